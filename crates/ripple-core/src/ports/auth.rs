//! Authentication ports: identity tokens and password hashing.

use uuid::Uuid;

/// Claims carried by a verified identity token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
}

/// Stateless token issuance and verification.
///
/// Tokens are a signed, time-bounded assertion of `{user_id, email}`; there
/// is no revocation list, validity is determined entirely at verification
/// time.
pub trait TokenService: Send + Sync {
    /// Produce a signed token for a user, expiring a fixed window after
    /// issuance.
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Validate and decode a token. Malformed shape, bad signature, and
    /// expiry all surface as the same opaque [`AuthError::InvalidToken`].
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Hashing error: {0}")]
    Hashing(String),
}
