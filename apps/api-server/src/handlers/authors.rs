//! Author handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Author, AuthorDraft};
use quill_core::validation::Input;
use quill_shared::dto::AuthorRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /authors
pub async fn list_authors(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let authors = state.authors.find_all().await?;
    Ok(HttpResponse::Ok().json(authors))
}

/// GET /authors/{id}
pub async fn get_author(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Author",
            id,
        })?;

    Ok(HttpResponse::Ok().json(author))
}

/// POST /authors
pub async fn create_author(
    state: web::Data<AppState>,
    body: web::Json<AuthorRequest>,
) -> AppResult<HttpResponse> {
    let input = Input::new().with("name", body.name.as_deref());
    let draft = AuthorDraft::from_input(&input).map_err(DomainError::Validation)?;

    // Check if the name is taken; the database unique index backs this up
    if state.authors.find_by_name(&draft.name).await?.is_some() {
        return Err(DomainError::Duplicate(format!("Author '{}' already exists", draft.name)).into());
    }

    let author = state.authors.insert(Author::new(draft)).await?;

    tracing::info!(author_id = %author.id, "Author created");
    Ok(HttpResponse::Created().json(author))
}
