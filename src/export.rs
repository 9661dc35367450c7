//! CSV export
//!
//! Writes records as comma-separated text.
//!
//! ## Output
//! ```text
//! id,title,author,year,isbn,status
//! 1,"Dune","Frank Herbert",1965,"978-0441013593","available"
//! ```
//! Text fields are always quoted, with embedded quotes doubled.
//! Integer fields are never quoted.

use std::io::Write;

use crate::error::Result;
use crate::record::Record;

/// First line of every export
pub const CSV_HEADER: &str = "id,title,author,year,isbn,status";

/// Quote a text field: `He said "hi"` → `"He said ""hi"""`
pub fn quote_field(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Render one record as a CSV line (no line terminator)
pub fn csv_row(record: &Record) -> String {
    format!(
        "{},{},{},{},{},{}",
        record.id,
        quote_field(&record.title),
        quote_field(&record.author),
        record.year,
        quote_field(&record.isbn),
        quote_field(&record.status)
    )
}

/// Write the header and one line per record.
///
/// Returns the number of record lines written.
pub fn write_csv<W: Write>(mut writer: W, records: &[Record]) -> Result<usize> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for record in records {
        writeln!(writer, "{}", csv_row(record))?;
    }
    writer.flush()?;
    Ok(records.len())
}
