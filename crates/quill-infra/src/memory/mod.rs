//! In-memory persistence - the fallback when no database is configured.

mod repos;
mod store;

pub use repos::{InMemoryAuthorRepository, InMemoryCommentRepository, InMemoryPostRepository};
pub use store::{Keyed, MemoryRepository};
