//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Error body: `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn invalid_id() -> Self {
        Self::new("Invalid ID")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn database_update_failed() -> Self {
        Self::new("Database update failed")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

/// One failed field in a validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

/// Validation failure body: `{ "errors": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldErrorBody>,
}
