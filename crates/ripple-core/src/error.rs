//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::FieldError;

/// Domain errors - business logic failures.
///
/// Every expected failure of a service operation maps onto exactly one of
/// these kinds; API adapters translate them into their own wire format
/// (HTTP status codes, GraphQL error extensions).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not authorized")]
    Forbidden,

    #[error("No {entity} found with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            // A unique-index violation that slipped past a pre-insert check.
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}
