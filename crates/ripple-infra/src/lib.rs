//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`:
//! Postgres and in-memory repositories, JWT token issuance, Argon2
//! password hashing, the in-process feed broadcaster, and local image
//! cleanup.

pub mod auth;
pub mod broadcast;
pub mod database;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use broadcast::InMemoryFeedBroadcaster;
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};
pub use storage::LocalImageCleanup;
