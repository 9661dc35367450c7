//! Query helpers
//!
//! Ordering of record snapshots. Nothing here touches storage.

use std::cmp::Ordering;
use std::fmt;

use crate::record::Record;

/// Field to order records by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Year,
    Title,
    Author,
}

impl SortKey {
    /// Compare two records on this key only
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Author => a.author.cmp(&b.author),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Id => "id",
            SortKey::Year => "year",
            SortKey::Title => "title",
            SortKey::Author => "author",
        };
        f.write_str(name)
    }
}

/// Stable sort in place.
///
/// Descending order reverses the comparison rather than the output,
/// so records with equal keys keep their original order either way.
pub fn sort_records(records: &mut [Record], key: SortKey, ascending: bool) {
    if ascending {
        records.sort_by(|a, b| key.compare(a, b));
    } else {
        records.sort_by(|a, b| key.compare(b, a));
    }
}
