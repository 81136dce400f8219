//! SeaORM entities for the `authors`, `posts` and `comments` tables.

pub mod author;
pub mod comment;
pub mod post;
