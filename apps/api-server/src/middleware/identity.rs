//! Caller identity extractor.
//!
//! There is no authentication. The author performing a write is named by the
//! `X-Author-Id` header, falling back to the configured default author.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's author id.
pub const AUTHOR_ID_HEADER: &str = "X-Author-Id";

/// The author on whose behalf a write is made.
///
/// ```ignore
/// async fn create(caller: Caller) -> impl Responder {
///     format!("Hello, author {}!", caller.author_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub author_id: Uuid,
}

impl Caller {
    fn resolve(req: &HttpRequest) -> Result<Self, AppError> {
        if let Some(value) = req.headers().get(AUTHOR_ID_HEADER) {
            let author_id = value
                .to_str()
                .ok()
                .and_then(|s| Uuid::parse_str(s.trim()).ok())
                .ok_or(AppError::InvalidId)?;
            return Ok(Self { author_id });
        }

        req.app_data::<web::Data<AppState>>()
            .and_then(|state| state.default_author)
            .map(|author_id| Self { author_id })
            .ok_or_else(|| AppError::InvalidQuery("Missing author identity".to_string()))
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::resolve(req))
    }
}
