use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Comment, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace the stored entity with the same ID.
    /// Returns `None` when nothing was stored under that ID.
    async fn update(&self, entity: T) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID, returning what was removed.
    async fn delete(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Set only the publish flag.
    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Post>, RepoError>;

    /// Atomically add `delta` to the comment counter.
    async fn adjust_comment_count(&self, id: Uuid, delta: i32) -> Result<Option<Post>, RepoError>;
}

/// Optional filters for listing comments. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub post: Option<Uuid>,
    pub commenter: Option<Uuid>,
}

impl CommentFilter {
    pub fn matches(&self, comment: &Comment) -> bool {
        self.post.is_none_or(|post| comment.post == post)
            && self.commenter.is_none_or(|commenter| comment.commenter == commenter)
    }
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments matching `filter`, newest first.
    async fn find_filtered(&self, filter: CommentFilter) -> Result<Vec<Comment>, RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// All authors ordered by name.
    async fn find_all(&self) -> Result<Vec<Author>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError>;
}
