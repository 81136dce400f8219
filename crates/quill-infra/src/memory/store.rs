//! Generic in-memory collection - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Author, Comment, Post};
use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

/// Anything stored in a [`MemoryRepository`] is keyed by its own ID.
pub trait Keyed: Clone + Send + Sync + 'static {
    fn key(&self) -> Uuid;
}

impl Keyed for Post {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Comment {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Author {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// In-memory document collection using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct MemoryRepository<T> {
    pub(crate) store: RwLock<HashMap<Uuid, T>>,
}

impl<T: Keyed> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Clone out every document matching `filter`.
    pub(crate) async fn collect_where(&self, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let store = self.store.read().await;
        store.values().filter(|v| filter(v)).cloned().collect()
    }

    /// Mutate a document in place under the write lock.
    pub(crate) async fn modify(&self, id: Uuid, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut store = self.store.write().await;
        let entity = store.get_mut(&id)?;
        change(entity);
        Some(entity.clone())
    }
}

impl<T: Keyed> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Keyed> BaseRepository<T, Uuid> for MemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        let id = entity.key();
        if store.contains_key(&id) {
            return Err(RepoError::Constraint(format!("Duplicate id {}", id)));
        }
        store.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<Option<T>, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&entity.key()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.remove(&id))
    }
}
