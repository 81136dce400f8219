//! Error handling - maps failures to `{ message }` and `{ errors }` bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::validation::FieldError;
use quill_core::{DomainError, RepoError};
use quill_shared::{ErrorResponse, FieldErrorBody, ValidationErrorResponse};
use std::fmt;

/// Application-level error type returned by every handler.
#[derive(Debug)]
pub enum AppError {
    InvalidId,
    InvalidQuery(String),
    NotFound(String),
    /// Field errors. Answered with 200 and an `errors` array rather than a 4xx.
    Validation(Vec<FieldError>),
    Conflict(String),
    /// One of two paired writes did not complete.
    PartialUpdateFailure,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidId => write!(f, "Invalid ID"),
            AppError::InvalidQuery(msg) => write!(f, "Invalid query: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::PartialUpdateFailure => write!(f, "Database update failed"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::OK,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PartialUpdateFailure | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => builder.json(ValidationErrorResponse {
                errors: errors
                    .iter()
                    .map(|e| FieldErrorBody {
                        field: e.field.to_string(),
                        message: e.message.clone(),
                    })
                    .collect(),
            }),
            AppError::InvalidId => builder.json(ErrorResponse::invalid_id()),
            AppError::InvalidQuery(detail) => builder.json(ErrorResponse::new(detail)),
            AppError::NotFound(detail) => builder.json(ErrorResponse::not_found(detail)),
            AppError::Conflict(detail) => builder.json(ErrorResponse::new(detail)),
            AppError::PartialUpdateFailure => builder.json(ErrorResponse::database_update_failed()),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                builder.json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                tracing::debug!(entity = entity_type, %id, "Entity not found");
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
