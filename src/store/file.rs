//! File Store
//!
//! Record store backed by one binary file.
//!
//! ## Write Paths
//! - `add`: encode, then a single append. Existing bytes are never touched.
//! - `update` / `remove`: decode everything, change it in memory, write the
//!   survivors to `{data_file}.tmp`, then rename over the live file.
//!
//! The live file is only ever replaced by the rename, so a failed write
//! phase or a failed rename leaves it exactly as it was.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::{Config, SyncMode};
use crate::error::{BookshelfError, Result};
use crate::record::{self, Record, ScanReport};

use super::{apply_remove, apply_update, BookStore};

/// File-backed record store
///
/// ## Concurrency:
/// - `write_lock` serializes add/update/remove inside this process
/// - Reads take no lock; they open, read, and close the file per call
/// - Other processes writing the same file are not guarded against
pub struct FileStore {
    /// Store configuration
    config: Config,

    /// Serializes mutations (scan + write must not interleave)
    write_lock: Mutex<()>,
}

impl FileStore {
    const TEMP_SUFFIX: &'static str = ".tmp";

    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the parent directory if missing
    /// 2. Create an empty data file if missing (existing content is kept)
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let created = !config.data_file.exists();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.data_file)?;

        tracing::debug!(
            path = %config.data_file.display(),
            created,
            "Opened record store"
        );

        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Decode the whole file, including scan diagnostics.
    ///
    /// A missing file reads as empty.
    pub fn scan(&self) -> Result<ScanReport> {
        let bytes = match fs::read(self.path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScanReport::default()),
            Err(e) => return Err(e.into()),
        };

        let report = record::decode_all(&bytes);

        if report.skipped_filler > 0 {
            tracing::warn!(
                path = %self.path().display(),
                skipped = report.skipped_filler,
                "Skipped blank filler records"
            );
        }
        if report.trailing_bytes > 0 {
            tracing::warn!(
                path = %self.path().display(),
                bytes = report.trailing_bytes,
                "Ignoring undecodable tail"
            );
        }

        Ok(report)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the temp file used by rewrites
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path().as_os_str());
        name.push(Self::TEMP_SUFFIX);
        PathBuf::from(name)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Append one encoded record with a single write.
    ///
    /// On a failed write the file is cut back to its previous length.
    fn append(&self, record: &Record) -> Result<()> {
        let bytes = record::encode(record)?;

        let mut file = OpenOptions::new().append(true).open(self.path())?;
        let previous_len = file.metadata()?.len();

        if let Err(e) = self.write_durably(&mut file, &bytes) {
            if let Err(trim) = file.set_len(previous_len) {
                tracing::warn!(error = %trim, "Failed to trim partial append");
            }
            return Err(e.into());
        }

        tracing::debug!(id = record.id, bytes = bytes.len(), "Appended record");
        Ok(())
    }

    /// Write all records to the temp file, then rename it over the live file
    fn rewrite(&self, records: &[Record]) -> Result<()> {
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, records) {
            self.discard_temp(&temp_path);
            return Err(e);
        }

        if let Err(source) = fs::rename(&temp_path, self.path()) {
            self.discard_temp(&temp_path);
            return Err(BookshelfError::Replace {
                path: self.path().to_path_buf(),
                source,
            });
        }

        tracing::debug!(
            path = %self.path().display(),
            records = records.len(),
            "Rewrote record store"
        );
        Ok(())
    }

    fn write_temp(&self, temp_path: &Path, records: &[Record]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp_path)?;

        let mut writer = BufWriter::new(file);
        for record in records {
            writer.write_all(&record::encode(record)?)?;
        }

        // The rename must never expose a temp file that is not on disk yet,
        // so this sync ignores the sync mode
        let file = writer
            .into_inner()
            .map_err(|e| BookshelfError::Io(e.into_error()))?;
        file.sync_all()?;
        Ok(())
    }

    /// Write bytes and honor the sync mode
    fn write_durably(&self, file: &mut File, bytes: &[u8]) -> io::Result<()> {
        file.write_all(bytes)?;
        file.flush()?;
        if self.config.sync_mode == SyncMode::EveryWrite {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Cut `trailing` undecodable bytes off the end of the live file
    fn trim_tail(&self, trailing: u64) -> Result<()> {
        let file = OpenOptions::new().write(true).open(self.path())?;
        let len = file.metadata()?.len();
        let keep = len.saturating_sub(trailing);
        file.set_len(keep)?;

        tracing::warn!(
            path = %self.path().display(),
            bytes = trailing,
            "Trimmed undecodable tail before append"
        );
        Ok(())
    }

    fn discard_temp(&self, temp_path: &Path) {
        match fs::remove_file(temp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %temp_path.display(),
                error = %e,
                "Failed to remove temp file"
            ),
        }
    }
}

impl BookStore for FileStore {
    fn add(&self, record: Record) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        let report = self.scan()?;
        if report.records.iter().any(|r| r.id == record.id) {
            return Err(BookshelfError::DuplicateId(record.id));
        }
        if record.is_filler() {
            tracing::warn!("Adding a blank record with id 0; it will read back as filler");
        }

        // Records appended past an undecodable tail would never be read back
        if report.trailing_bytes > 0 {
            self.trim_tail(report.trailing_bytes as u64)?;
        }

        self.append(&record)
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        Ok(self.scan()?.records)
    }

    fn update(&self, id: i32, record: Record) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        let mut records = self.scan()?.records;
        apply_update(&mut records, id, record)?;
        self.rewrite(&records)
    }

    fn remove(&self, id: i32) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        let mut records = self.scan()?.records;
        apply_remove(&mut records, id)?;
        self.rewrite(&records)
    }
}
