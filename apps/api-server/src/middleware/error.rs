//! Error handling - maps domain errors onto HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use ripple_core::DomainError;
use ripple_shared::ErrorBody;

/// Application-level error wrapper for the REST surface.
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            DomainError::Validation(errors) => {
                ErrorBody::new("Validation failed").with_data(errors.clone())
            }
            DomainError::Internal(detail) => {
                // Log the detail, never leak it.
                tracing::error!("Internal error: {}", detail);
                ErrorBody::new("Internal server error")
            }
            other => ErrorBody::new(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
