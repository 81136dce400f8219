use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{Field, FieldError, Input, Pipeline};

/// Comment entity - a reader's comment attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub commenter: Uuid,
    pub post: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub replies: Vec<Uuid>,
}

impl Comment {
    /// Create a new comment on `post` with no replies.
    pub fn new(post: Uuid, commenter: Uuid, draft: CommentDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            commenter,
            post,
            timestamp: Utc::now(),
            text: draft.text,
            replies: Vec::new(),
        }
    }

    /// Replace the text, keeping everything else.
    pub fn apply(self, draft: CommentDraft) -> Self {
        Self {
            text: draft.text,
            ..self
        }
    }
}

/// Validated comment text, used for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub text: String,
}

impl CommentDraft {
    pub fn from_input(input: &Input<'_>) -> Result<Self, Vec<FieldError>> {
        let mut sanitized = Pipeline::new()
            .field(
                Field::required("text")
                    .trim()
                    .strip_scripts()
                    .trim()
                    .not_empty("Comment must not be empty")
                    .escape(),
            )
            .run(input)?;

        Ok(Self {
            text: sanitized.take("text").unwrap_or_default(),
        })
    }
}
