//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::RepoError;
use quill_core::ports::{AuthorRepository, CommentRepository, PostRepository};
use quill_infra::memory::{
    InMemoryAuthorRepository, InMemoryCommentRepository, InMemoryPostRepository,
};
use uuid::Uuid;

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresAuthorRepository, PostgresCommentRepository,
    PostgresPostRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    /// Author used for writes that carry no caller identity.
    pub default_author: Option<Uuid>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let connections = Arc::new(DatabaseConnections::init(db_config).await?);
            let conn = connections.main.clone();

            tracing::info!("Application state initialized (postgres)");
            return Ok(Self {
                posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
                authors: Arc::new(PostgresAuthorRepository::new(conn)),
                default_author: config.default_author,
                db: Some(connections),
            });
        }

        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        tracing::info!("Application state initialized (in-memory)");
        Ok(Self::in_memory(config.default_author))
    }

    /// State backed entirely by the in-memory store.
    pub fn in_memory(default_author: Option<Uuid>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            authors: Arc::new(InMemoryAuthorRepository::new()),
            default_author,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Name of the backing store, as reported by `/health`.
    pub fn storage_kind(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if self.db.is_some() {
            return "postgres";
        }
        "memory"
    }

    /// Ping the database. The in-memory store is always reachable.
    pub async fn storage_reachable(&self) -> bool {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            return match db.ping().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Database ping failed: {}", e);
                    false
                }
            };
        }
        true
    }

    /// Release persistence resources once the server has stopped.
    pub async fn shutdown(&self) {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            if let Err(e) = db.close().await {
                tracing::error!("Failed to close database connection: {}", e);
            }
        }

        tracing::info!("Shutdown complete");
    }
}
