//! In-memory store
//!
//! Vector-backed adapter with the same rules as the file store.

use parking_lot::RwLock;

use crate::error::{BookshelfError, Result};
use crate::record::Record;

use super::{apply_remove, apply_update, BookStore};

/// Record store that lives only as long as the value
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl BookStore for MemoryStore {
    fn add(&self, record: Record) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(BookshelfError::DuplicateId(record.id));
        }
        records.push(record);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().clone())
    }

    fn update(&self, id: i32, record: Record) -> Result<()> {
        apply_update(&mut self.records.write(), id, record)
    }

    fn remove(&self, id: i32) -> Result<()> {
        apply_remove(&mut self.records.write(), id).map(|_| ())
    }
}
