//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Post, PostChanges, PostDraft};
use quill_core::validation::Input;
use quill_shared::dto::{PostRequest, PublishQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::identity::Caller;
use crate::state::AppState;

fn post_input(req: &PostRequest) -> Input<'_> {
    Input::new()
        .with("title", req.title.as_deref())
        .with("category", req.category.as_deref())
        .with("text", req.text.as_deref())
        .with("isPublished", req.is_published.as_deref())
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{id}
pub async fn get_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.find_by_id(id).await?.ok_or(not_found(id))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let draft = PostDraft::from_input(&post_input(&req)).map_err(DomainError::Validation)?;

    let post = state
        .posts
        .insert(Post::new(caller.author_id, draft))
        .await?;

    tracing::info!(post_id = %post.id, author_id = %post.author, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /posts/{id}
pub async fn edit_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let changes = PostChanges::from_input(&post_input(&req)).map_err(DomainError::Validation)?;

    let existing = state.posts.find_by_id(id).await?.ok_or(not_found(id))?;

    // Deleted between the read and the write
    let post = state
        .posts
        .update(existing.apply(changes))
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(post_id = %id, "Post edited");
    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /posts/{id}?publish=true|false
pub async fn publish_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    query: web::Query<PublishQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let publish = match query.publish.as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => {
            return Err(AppError::InvalidQuery(
                "publish must be \"true\" or \"false\"".to_string(),
            ));
        }
    };

    let post = state
        .posts
        .set_published(id, publish)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(post_id = %id, published = publish, "Post publish state changed");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Comments on the post are left in place.
    let post = state.posts.delete(id).await?.ok_or(not_found(id))?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::Ok().json(post))
}
