//! # Ripple Core
//!
//! The domain layer of the Ripple backend.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: entities, domain errors, the ports infrastructure must
//! implement, and the service layer shared by every API surface.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
