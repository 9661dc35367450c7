//! Store Module
//!
//! The record store contract and its adapters.
//!
//! ## Responsibilities
//! - Keep a set of records keyed by `id`, in insertion order
//! - Reject duplicate ids on insert and unknown ids on update/remove
//! - Produce sorted snapshots and CSV exports without mutating anything
//!
//! ## Adapters
//! - [`FileStore`]: binary file, append on insert, rewrite-and-rename otherwise
//! - [`MemoryStore`]: plain vector behind a lock, for tests and embedding
//!
//! Sorting and export are provided methods built on `get_all`, so an
//! adapter only implements the five storage operations.

mod file;
mod memory;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{BookshelfError, Result};
use crate::export;
use crate::query::{self, SortKey};
use crate::record::Record;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Keyed, ordered collection of records
///
/// Every operation either succeeds completely or leaves the store as it
/// was. Failures come back as errors, never as panics.
pub trait BookStore {
    /// Insert a record.
    ///
    /// Fails with `DuplicateId` if a record with the same id exists.
    fn add(&self, record: Record) -> Result<()>;

    /// All records in insertion order
    fn get_all(&self) -> Result<Vec<Record>>;

    /// Replace the record stored under `id` with `record` as a whole.
    ///
    /// `record.id` may differ from `id`; the record is then found under
    /// its new id. Fails with `NotFound` if `id` is absent, or with
    /// `DuplicateId` if the new id belongs to another record.
    fn update(&self, id: i32, record: Record) -> Result<()>;

    /// Delete the record stored under `id`.
    ///
    /// Fails with `NotFound` if `id` is absent.
    fn remove(&self, id: i32) -> Result<()>;

    /// First record with the given id
    fn find_by_id(&self, id: i32) -> Result<Option<Record>> {
        Ok(self.get_all()?.into_iter().find(|r| r.id == id))
    }

    /// Copy of all records ordered by `key` (stable; ties keep insertion order)
    fn sort_by(&self, key: SortKey, ascending: bool) -> Result<Vec<Record>> {
        let mut records = self.get_all()?;
        query::sort_records(&mut records, key, ascending);
        Ok(records)
    }

    /// Write every record to `path` as CSV.
    ///
    /// Returns the number of records written.
    fn export_csv(&self, path: &Path) -> Result<usize> {
        let records = self.get_all()?;
        let file = File::create(path)?;
        let written = export::write_csv(BufWriter::new(file), &records)?;
        tracing::debug!(path = %path.display(), rows = written, "Exported CSV");
        Ok(written)
    }
}

impl<S: BookStore + ?Sized> BookStore for &S {
    fn add(&self, record: Record) -> Result<()> {
        (**self).add(record)
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        (**self).get_all()
    }

    fn update(&self, id: i32, record: Record) -> Result<()> {
        (**self).update(id, record)
    }

    fn remove(&self, id: i32) -> Result<()> {
        (**self).remove(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Record>> {
        (**self).find_by_id(id)
    }

    fn sort_by(&self, key: SortKey, ascending: bool) -> Result<Vec<Record>> {
        (**self).sort_by(key, ascending)
    }

    fn export_csv(&self, path: &Path) -> Result<usize> {
        (**self).export_csv(path)
    }
}

/// Apply an update to an in-memory snapshot.
///
/// Shared by adapters so they agree on the duplicate/not-found rules.
pub(crate) fn apply_update(records: &mut [Record], id: i32, record: Record) -> Result<()> {
    let position = records
        .iter()
        .position(|r| r.id == id)
        .ok_or(BookshelfError::NotFound(id))?;

    if record.id != id && records.iter().any(|r| r.id == record.id) {
        return Err(BookshelfError::DuplicateId(record.id));
    }

    records[position] = record;
    Ok(())
}

/// Remove a record from an in-memory snapshot
pub(crate) fn apply_remove(records: &mut Vec<Record>, id: i32) -> Result<Record> {
    let position = records
        .iter()
        .position(|r| r.id == id)
        .ok_or(BookshelfError::NotFound(id))?;
    Ok(records.remove(position))
}
