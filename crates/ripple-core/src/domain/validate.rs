//! Field-level input validation.
//!
//! Validation is a pure pre-check that produces a list of field errors;
//! services decide when in the operation flow the list is raised.

use serde::{Deserialize, Serialize};

pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_CONTENT_LEN: usize = 5;
pub const MIN_PASSWORD_LEN: usize = 5;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Lowercased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Validate signup input. `email` is expected to be normalized already.
pub fn validate_signup(email: &str, name: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must contain at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name must not be empty"));
    }

    errors
}

/// Validate post title/content. Image presence is a surface-specific rule
/// and is checked by the REST adapter.
pub fn validate_post_input(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if title.trim().chars().count() < MIN_TITLE_LEN {
        errors.push(FieldError::new(
            "title",
            format!("Title must contain at least {MIN_TITLE_LEN} characters"),
        ));
    }
    if content.trim().chars().count() < MIN_CONTENT_LEN {
        errors.push(FieldError::new(
            "content",
            format!("Content must contain at least {MIN_CONTENT_LEN} characters"),
        ));
    }

    errors
}
