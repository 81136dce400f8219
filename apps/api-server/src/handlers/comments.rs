//! Comment handlers.
//!
//! Creating and deleting a comment also adjusts the parent post's
//! `commentCount`. The two writes are independent; see [`create`].

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Comment, CommentDraft};
use quill_core::ports::CommentFilter;
use quill_core::validation::Input;
use quill_shared::dto::{CommentQuery, CommentRequest, CommentResponse, CommenterSummary};

use super::parse_id;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn comment_input(req: &CommentRequest) -> Input<'_> {
    Input::new().with("text", req.text.as_deref())
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Comment",
        id,
    }
}

fn parse_optional_id(raw: Option<&str>) -> AppResult<Option<Uuid>> {
    raw.map(parse_id).transpose()
}

fn to_response(comment: Comment, commenter: Option<CommenterSummary>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        commenter,
        post: comment.post,
        timestamp: comment.timestamp,
        text: comment.text,
        replies: comment.replies,
    }
}

/// Expand each comment's commenter to a name-only summary.
async fn populate(state: &AppState, comments: Vec<Comment>) -> AppResult<Vec<CommentResponse>> {
    let mut ids: Vec<Uuid> = comments.iter().map(|c| c.commenter).collect();
    ids.sort_unstable();
    ids.dedup();

    let names: HashMap<Uuid, String> = state
        .authors
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    Ok(comments
        .into_iter()
        .map(|comment| {
            let commenter = names
                .get(&comment.commenter)
                .map(|name| CommenterSummary { name: name.clone() });
            to_response(comment, commenter)
        })
        .collect())
}

async fn list(state: &AppState, filter: CommentFilter) -> AppResult<HttpResponse> {
    let comments = state.comments.find_filtered(filter).await?;
    let comments = populate(state, comments).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments?postID=&commenterID=
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    let filter = CommentFilter {
        post: parse_optional_id(query.post_id.as_deref())?,
        commenter: parse_optional_id(query.commenter_id.as_deref())?,
    };
    list(&state, filter).await
}

/// GET /posts/{id}/comments?commenterID=
pub async fn list_post_comments(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    let filter = CommentFilter {
        post: Some(path.into_inner()),
        commenter: parse_optional_id(query.commenter_id.as_deref())?,
    };
    list(&state, filter).await
}

/// GET /comments/{id}
pub async fn get_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let comment = state.comments.find_by_id(id).await?.ok_or(not_found(id))?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Insert the comment and bump the post's counter concurrently.
///
/// Both writes must report success. They are not transactional: when one
/// fails the other is not rolled back, so a comment can exist without having
/// been counted (or the reverse).
async fn create(
    state: &AppState,
    post_id: Uuid,
    commenter_id: Option<&str>,
    req: &CommentRequest,
) -> AppResult<HttpResponse> {
    let commenter_id = match commenter_id {
        Some(raw) => parse_id(raw)?,
        None => return Err(AppError::InvalidQuery("commenterID is required".to_string())),
    };

    let draft = CommentDraft::from_input(&comment_input(req)).map_err(DomainError::Validation)?;
    let comment = Comment::new(post_id, commenter_id, draft);
    let comment_id = comment.id;

    let (saved, counted) = tokio::join!(
        state.comments.insert(comment),
        state.posts.adjust_comment_count(post_id, 1),
    );

    let comment = match (saved, counted) {
        (Ok(comment), Ok(Some(_))) => comment,
        (saved, counted) => {
            tracing::error!(
                %post_id,
                %comment_id,
                insert_error = ?saved.as_ref().err(),
                counter_updated = ?counted.as_ref().map(Option::is_some),
                "Comment creation did not complete both writes"
            );
            return Err(AppError::PartialUpdateFailure);
        }
    };

    let commenter = state
        .authors
        .find_by_id(commenter_id)
        .await?
        .map(|a| CommenterSummary { name: a.name });

    tracing::info!(%post_id, %comment_id, %commenter_id, "Comment created");
    Ok(HttpResponse::Created().json(to_response(comment, commenter)))
}

/// POST /comments?postID=&commenterID=
pub async fn create_comment(
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = match query.post_id.as_deref() {
        Some(raw) => parse_id(raw)?,
        None => return Err(AppError::InvalidQuery("postID is required".to_string())),
    };
    create(&state, post_id, query.commenter_id.as_deref(), &body).await
}

/// POST /posts/{id}/comments?commenterID=
pub async fn create_post_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    create(&state, post_id, query.commenter_id.as_deref(), &body).await
}

/// PUT /comments/{id}
pub async fn edit_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let draft = CommentDraft::from_input(&comment_input(&body)).map_err(DomainError::Validation)?;

    let existing = state.comments.find_by_id(id).await?.ok_or(not_found(id))?;

    let comment = state
        .comments
        .update(existing.apply(draft))
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(comment_id = %id, "Comment edited");
    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let comment = state.comments.delete(id).await?.ok_or(not_found(id))?;

    // Best effort: the comment is already gone either way.
    match state.posts.adjust_comment_count(comment.post, -1).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(
                comment_id = %id,
                post_id = %comment.post,
                "Parent post missing, count not decremented"
            );
        }
        Err(e) => {
            tracing::warn!(
                comment_id = %id,
                post_id = %comment.post,
                "Failed to decrement comment count: {}",
                e
            );
        }
    }

    tracing::info!(comment_id = %id, post_id = %comment.post, "Comment deleted");
    Ok(HttpResponse::NoContent().finish())
}
