//! Data models for Bookshelf

pub mod book;
pub mod envelope;

pub use book::{Book, BookPayload, BookQuery, BookShort};
pub use envelope::{Envelope, ResponseStatus};
