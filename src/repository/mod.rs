//! Repository layer for book storage

pub mod books;

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use books::BookStore;

/// Main repository struct holding the shared book store.
///
/// A single lock guards the whole collection: readers share it, writers
/// hold it exclusively for the length of one catalog operation.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<BookStore>>,
}

impl Repository {
    /// Create a repository over an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository over an existing store
    pub fn with_store(store: BookStore) -> Self {
        Self {
            books: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, BookStore> {
        self.books.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, BookStore> {
        self.books.write().await
    }
}
