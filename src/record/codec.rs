//! Record codec
//!
//! Binary encoding of records and the tolerant scan over a whole file.
//!
//! ## Record Format
//! ```text
//! ┌────────┬──────────┬─────────────────┬──────────────────┬────────────────┬─────────────────┐
//! │ id (4) │ year (4) │ len(8) + title  │ len(8) + author  │ len(8) + isbn  │ len(8) + status │
//! └────────┴──────────┴─────────────────┴──────────────────┴────────────────┴─────────────────┘
//! ```
//! - Integers are little-endian, `id`/`year` signed 32-bit
//! - Lengths are unsigned 64-bit byte counts of the raw UTF-8 that follows
//! - No header, no terminator, no checksum: a file is records back to back

use bincode::Options;

use crate::error::Result;

use super::Record;

/// Fixed-width bytes per record before any text: id + year + 4 length prefixes
pub const FIXED_SIZE: usize = 4 + 4 + 4 * 8;

/// Encoding options shared by writer and reader
fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
}

/// Encode one record to bytes
pub fn encode(record: &Record) -> Result<Vec<u8>> {
    Ok(options().serialize(record)?)
}

/// Exact number of bytes `encode` produces for this record
pub fn encoded_len(record: &Record) -> usize {
    FIXED_SIZE + record.title.len() + record.author.len() + record.isbn.len() + record.status.len()
}

/// Result of scanning a whole file
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Decoded records in on-disk order, filler excluded
    pub records: Vec<Record>,

    /// Number of all-zero/empty records that were skipped
    pub skipped_filler: usize,

    /// Bytes at the end that did not decode (truncated or corrupt tail)
    pub trailing_bytes: usize,
}

impl ScanReport {
    /// True when the whole input decoded cleanly with nothing skipped
    pub fn is_clean(&self) -> bool {
        self.skipped_filler == 0 && self.trailing_bytes == 0
    }
}

/// Decode every record from `bytes`.
///
/// Never fails: decoding stops at the first record that cannot be read
/// completely, and everything before it is kept. Each attempt is limited
/// to the bytes that remain, so a garbage length prefix is rejected
/// instead of allocated.
pub fn decode_all(bytes: &[u8]) -> ScanReport {
    let mut report = ScanReport::default();
    let mut remaining = bytes;

    while !remaining.is_empty() {
        let before = remaining;
        let decoded = options()
            .with_limit(remaining.len() as u64)
            .deserialize_from::<_, Record>(&mut remaining);

        match decoded {
            Ok(record) if record.is_filler() => report.skipped_filler += 1,
            Ok(record) => report.records.push(record),
            Err(_) => {
                report.trailing_bytes = before.len();
                break;
            }
        }
    }

    report
}
