//! Book record model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, BoolFromInt, PickFirst};
use utoipa::{IntoParams, ToSchema};

/// Full book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier assigned at creation
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total number of pages
    pub page_count: Option<i64>,
    /// Pages already read
    pub read_page: Option<i64>,
    pub reading: Option<bool>,
    /// Whether `readPage == pageCount` when the book was added.
    /// Left untouched by updates.
    pub finished: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from an accepted payload
    pub fn create(id: String, name: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = payload.page_count == payload.read_page;

        Self {
            id,
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            finished,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every field except `id`, `insertedAt` and `finished`
    pub fn apply_update(&mut self, name: String, payload: BookPayload, now: DateTime<Utc>) {
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

/// List view of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update request body
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    /// `true`/`false` or `1`/`0`
    #[serde_as(as = "Option<PickFirst<(_, BoolFromInt)>>")]
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Non-empty book name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// True when both counts are given and more pages are read than exist
    pub fn read_page_exceeds_page_count(&self) -> bool {
        matches!((self.read_page, self.page_count), (Some(read), Some(total)) if read > total)
    }
}

/// List filters, taken verbatim from the query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, `0` otherwise
    pub reading: Option<String>,
    /// `1` for finished books, `0` otherwise
    pub finished: Option<String>,
}

impl BookQuery {
    /// Build filters from raw query pairs. A repeated key keeps its last
    /// value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "reading" => query.reading = Some(value),
                "finished" => query.finished = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Whether a book passes every supplied filter
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = present(&self.name) {
            if !book.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if let Some(reading) = present(&self.reading) {
            if !flag_matches(book.reading, reading) {
                return false;
            }
        }

        if let Some(finished) = present(&self.finished) {
            if !flag_matches(Some(book.finished), finished) {
                return false;
            }
        }

        true
    }
}

/// Empty filter values count as not supplied
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Compare a boolean, coerced to 0/1, with a numeric filter value.
/// Values that are not numbers, and absent flags, never match.
fn flag_matches(flag: Option<bool>, filter: &str) -> bool {
    let Some(flag) = flag else {
        return false;
    };

    let Some(wanted) = numeric_value(filter) else {
        return false;
    };

    wanted == if flag { 1.0 } else { 0.0 }
}

/// Numeric value of a filter string: surrounding whitespace is ignored,
/// blank reads as 0, and `0x`/`0o`/`0b` prefixes select a radix.
fn numeric_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return trimmed.parse::<f64>().ok(),
    };

    let digits = &trimmed[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u128::from_str_radix(digits, radix).ok().map(|value| value as f64)
}
