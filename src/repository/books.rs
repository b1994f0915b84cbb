//! In-memory book store

use crate::models::Book;

/// Ordered collection of book records.
///
/// Insertion order is preserved and every lookup is a linear scan for the
/// first record with a matching id.
#[derive(Debug, Default, Clone)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of records carrying `id`
    pub fn count_by_id(&self, id: &str) -> usize {
        self.books.iter().filter(|book| book.id == id).count()
    }

    /// Append a record at the end of the collection
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Mutable access to the first record with `id`
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// Remove the first record with `id`, returning it
    pub fn remove(&mut self, id: &str) -> Option<Book> {
        let index = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(index))
    }
}
