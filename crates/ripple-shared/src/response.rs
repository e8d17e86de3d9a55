//! Standardized API response bodies.
//!
//! Successful responses are `{message, ...payload}` (see the DTOs); error
//! responses are `{message, data?}` where `data` carries field-level
//! validation errors when present.

use serde::{Deserialize, Serialize};

use ripple_core::domain::FieldError;

/// A bare `{message}` body for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,

    /// Field-level validation errors, when the failure has them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Vec<FieldError>) -> Self {
        self.data = Some(data);
        self
    }
}
