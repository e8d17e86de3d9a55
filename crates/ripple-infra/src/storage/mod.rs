//! Image storage cleanup implementations.

mod local;

pub use local::LocalImageCleanup;
