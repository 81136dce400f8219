use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{Field, FieldError, Input, Pipeline};

/// Author entity - anyone who writes posts or comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

impl Author {
    pub fn new(draft: AuthorDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
}

impl AuthorDraft {
    pub fn from_input(input: &Input<'_>) -> Result<Self, Vec<FieldError>> {
        let mut sanitized = Pipeline::new()
            .field(
                Field::required("name")
                    .trim()
                    .not_empty("Name must not be empty")
                    .escape(),
            )
            .run(input)?;

        Ok(Self {
            name: sanitized.take("name").unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed_and_escaped() {
        let draft = AuthorDraft::from_input(&Input::new().with("name", Some("  Tom & Jerry "))).unwrap();
        assert_eq!(draft.name, "Tom &amp; Jerry");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let errors = AuthorDraft::from_input(&Input::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Name must not be empty");
    }
}
