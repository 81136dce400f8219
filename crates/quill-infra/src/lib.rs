//! # Quill Infrastructure
//!
//! Concrete implementations of the repository ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryCommentRepository, InMemoryPostRepository};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresAuthorRepository, PostgresCommentRepository,
    PostgresPostRepository,
};
