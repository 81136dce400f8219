//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are raw strings; the server runs them through the
//! validation pipeline before anything is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub text: Option<String>,
    pub is_published: Option<String>,
}

/// Body of `POST /comments` and `PUT /comments/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// Body of `POST /authors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub name: Option<String>,
}

/// Query string of `PATCH /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishQuery {
    pub publish: Option<String>,
}

/// Query string of the comment list and create endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentQuery {
    #[serde(rename = "postID")]
    pub post_id: Option<String>,
    #[serde(rename = "commenterID")]
    pub commenter_id: Option<String>,
}

/// The commenter as shown next to a comment: display name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommenterSummary {
    pub name: String,
}

/// A comment with its commenter expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub commenter: Option<CommenterSummary>,
    pub post: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub replies: Vec<Uuid>,
}
