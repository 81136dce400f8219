//! In-memory repository implementations.

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{Author, Comment, Post};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, CommentFilter, CommentRepository, PostRepository};

use super::store::MemoryRepository;

/// In-memory post repository.
pub type InMemoryPostRepository = MemoryRepository<Post>;

/// In-memory comment repository.
pub type InMemoryCommentRepository = MemoryRepository<Comment>;

/// In-memory author repository.
pub type InMemoryAuthorRepository = MemoryRepository<Author>;

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.collect_where(|_| true).await;
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(posts)
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Post>, RepoError> {
        Ok(self.modify(id, |post| post.is_published = published).await)
    }

    async fn adjust_comment_count(&self, id: Uuid, delta: i32) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, delta, "Adjusting comment count");
        Ok(self
            .modify(id, |post| post.comment_count += delta)
            .await)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_filtered(&self, filter: CommentFilter) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self.collect_where(|c| filter.matches(c)).await;
        comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(comments)
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let mut authors = self.collect_where(|_| true).await;
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError> {
        Ok(self
            .collect_where(|a| a.name == name)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        Ok(self.collect_where(|a| ids.contains(&a.id)).await)
    }
}
