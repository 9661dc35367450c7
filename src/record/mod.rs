//! Record Module
//!
//! The single entity kept by the store: one book.
//!
//! ## Responsibilities
//! - Define the record fields and their on-disk order
//! - Render a record as one human-readable line
//! - Recognize filler (all-zero/empty) records left by corruption
//!
//! ## Field Order
//! Serde serializes fields in declaration order, so `id` and `year` come
//! first, followed by the four text fields. See [`codec`] for the bytes.

pub mod codec;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use codec::{decode_all, encode, encoded_len, ScanReport};

/// One book entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Unique key, supplied by the caller
    pub id: i32,

    /// Publication year (no range validation)
    pub year: i32,

    pub title: String,
    pub author: String,
    pub isbn: String,

    /// Conventionally "available" or "loaned"
    pub status: String,
}

impl Record {
    /// Create a record from its six fields
    pub fn new(
        id: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        isbn: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            year,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            status: status.into(),
        }
    }

    /// True when every field is zero or empty.
    ///
    /// Such a record cannot be told apart from zeroed garbage, so scans
    /// skip it. A deliberately stored all-empty record with id 0 is lost
    /// the same way.
    pub fn is_filler(&self) -> bool {
        self.id == 0
            && self.year == 0
            && self.title.is_empty()
            && self.author.is_empty()
            && self.isbn.is_empty()
            && self.status.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Title: {} | Author: {} | Year: {} | ISBN: {} | Status: {}",
            self.id, self.title, self.author, self.year, self.isbn, self.status
        )
    }
}
