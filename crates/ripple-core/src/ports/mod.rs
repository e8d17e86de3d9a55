//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod broadcast;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use broadcast::FeedPublisher;
pub use repository::{BaseRepository, PostRepository, UserRepository};
pub use storage::ImageCleanup;
