//! Domain entities - the core business objects.

mod author;
mod category;
mod comment;
mod post;

pub use author::{Author, AuthorDraft};
pub use category::{Category, UnknownCategory};
pub use comment::{Comment, CommentDraft};
pub use post::{Post, PostChanges, PostDraft};
