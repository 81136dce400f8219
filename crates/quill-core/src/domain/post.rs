use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;
use crate::validation::{Field, FieldError, Input, Pipeline};

/// Post entity - a blog post with its paragraphs and comment counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author: Uuid,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub text: Vec<String>,
    pub is_published: bool,
    pub comment_count: i32,
}

impl Post {
    /// Create a new post authored by `author`.
    pub fn new(author: Uuid, draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            title: draft.title,
            timestamp: Utc::now(),
            category: draft.category,
            text: draft.text,
            is_published: draft.is_published,
            comment_count: 0,
        }
    }

    /// Apply an edit. Fields missing from `changes` keep their current value.
    pub fn apply(self, changes: PostChanges) -> Self {
        Self {
            title: changes.title.unwrap_or(self.title),
            category: changes.category.unwrap_or(self.category),
            text: changes.text.unwrap_or(self.text),
            is_published: changes.is_published.unwrap_or(self.is_published),
            ..self
        }
    }
}

/// Validated input for a new post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub category: Category,
    pub text: Vec<String>,
    pub is_published: bool,
}

/// Validated input for a post edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub text: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

fn title(field: Field) -> Field {
    field.trim().not_empty("Title must not be empty").escape()
}

fn category(field: Field) -> Field {
    field.trim().lowercase().one_of(
        Category::NAMES,
        format!("Category must be one of: {}", Category::NAMES.join(", ")),
    )
}

fn text(field: Field) -> Field {
    field
        .trim()
        .strip_scripts()
        .trim()
        .not_empty("Text must not be empty")
        .escape()
}

fn is_published(field: Field) -> Field {
    field.trim().lowercase().escape()
}

fn parse_category(name: &str) -> Result<Category, Vec<FieldError>> {
    name.parse::<Category>().map_err(|e| {
        vec![FieldError {
            field: "category",
            message: e.to_string(),
        }]
    })
}

impl PostDraft {
    pub fn from_input(input: &Input<'_>) -> Result<Self, Vec<FieldError>> {
        let mut sanitized = Pipeline::new()
            .field(title(Field::required("title")))
            .field(category(Field::required("category")))
            .field(text(Field::required("text")))
            .field(is_published(Field::optional("isPublished").default_to("no")))
            .run(input)?;

        Ok(Self {
            category: parse_category(sanitized.get("category").unwrap_or_default())?,
            title: sanitized.take("title").unwrap_or_default(),
            is_published: sanitized.flag("isPublished").unwrap_or(false),
            text: sanitized.take_paragraphs("text").unwrap_or_default(),
        })
    }
}

impl PostChanges {
    pub fn from_input(input: &Input<'_>) -> Result<Self, Vec<FieldError>> {
        let mut sanitized = Pipeline::new()
            .field(title(Field::optional("title")))
            .field(category(Field::optional("category")))
            .field(text(Field::optional("text")))
            .field(is_published(Field::optional("isPublished")))
            .run(input)?;

        Ok(Self {
            category: sanitized.get("category").map(parse_category).transpose()?,
            is_published: sanitized.flag("isPublished"),
            title: sanitized.take("title"),
            text: sanitized.take_paragraphs("text"),
        })
    }
}
