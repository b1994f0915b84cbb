//! Book catalog service

use std::sync::Arc;

use chrono::Utc;

use super::ids::IdGenerator;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookShort},
    repository::{BookStore, Repository},
};

/// Candidate ids drawn before giving up on an insert
const MAX_ID_ATTEMPTS: usize = 8;

const ADD_FAILED: &str = "Book could not be added";

/// Write operations that share payload validation
#[derive(Debug, Clone, Copy)]
enum WriteAction {
    Add,
    Update,
}

impl WriteAction {
    fn failure_prefix(self) -> &'static str {
        match self {
            WriteAction::Add => "Failed to add book",
            WriteAction::Update => "Failed to update book",
        }
    }
}

/// Check a create/update payload and return the accepted name.
///
/// The name check runs first, then the page counts.
fn validate_payload(payload: &BookPayload, action: WriteAction) -> AppResult<String> {
    let Some(name) = payload.name() else {
        tracing::warn!("{:?} rejected: missing name", action);
        return Err(AppError::Validation(format!(
            "{}. Please provide the book name",
            action.failure_prefix()
        )));
    };

    if payload.read_page_exceeds_page_count() {
        tracing::warn!(
            "{:?} rejected: readPage {:?} > pageCount {:?}",
            action,
            payload.read_page,
            payload.page_count
        );
        return Err(AppError::Validation(format!(
            "{}. readPage must not be greater than pageCount",
            action.failure_prefix()
        )));
    }

    Ok(name.to_string())
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
}

impl CatalogService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Add a book and return its new id
    pub async fn add_book(&self, payload: BookPayload) -> AppResult<String> {
        let name = validate_payload(&payload, WriteAction::Add)?;

        let mut store = self.repository.write().await;
        let id = self.unused_id(&store)?;

        store.push(Book::create(id.clone(), name, payload, Utc::now()));

        if store.count_by_id(&id) != 1 {
            return Err(AppError::Internal(ADD_FAILED.to_string()));
        }

        tracing::info!("Book added: id={} (total {})", id, store.len());
        Ok(id)
    }

    /// List books passing every supplied filter, in insertion order
    pub async fn list_books(&self, query: &BookQuery) -> Vec<BookShort> {
        let store = self.repository.read().await;

        let books: Vec<BookShort> = store
            .all()
            .iter()
            .filter(|book| query.matches(book))
            .map(BookShort::from)
            .collect();

        tracing::debug!("Listed {} of {} books with {:?}", books.len(), store.len(), query);
        books
    }

    /// Get the full record of a book
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace a book's fields.
    ///
    /// The payload is validated before the id is looked up. `finished` keeps
    /// the value computed when the book was added.
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let name = validate_payload(&payload, WriteAction::Update)?;

        let mut store = self.repository.write().await;
        let book = store.find_mut(id).ok_or_else(|| {
            AppError::NotFound(format!("{}. Id not found", WriteAction::Update.failure_prefix()))
        })?;

        book.apply_update(name, payload, Utc::now());

        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    /// Remove a book
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let mut store = self.repository.write().await;

        if store.remove(id).is_none() {
            return Err(AppError::NotFound(
                "Failed to delete book. Id not found".to_string(),
            ));
        }

        tracing::info!("Book deleted: id={} (total {})", id, store.len());
        Ok(())
    }

    /// Number of stored books
    pub async fn count(&self) -> usize {
        self.repository.read().await.len()
    }

    /// Draw ids until one is not used by any stored book
    fn unused_id(&self, store: &BookStore) -> AppResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if !store.contains(&id) {
                return Ok(id);
            }
            tracing::debug!("Generated id {} already in use", id);
        }

        Err(AppError::Internal(ADD_FAILED.to_string()))
    }
}
