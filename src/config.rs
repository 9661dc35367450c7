//! Configuration for Bookshelf
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a file-backed store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding every record.
    /// Rewrites go through a sibling temp file:
    ///   {parent}/
    ///     ├── books.dat        (live records)
    ///     └── books.dat.tmp    (only present during a rewrite)
    pub data_file: PathBuf,

    /// Sync strategy: when to fsync the backing file
    pub sync_mode: SyncMode,
}

/// Durability strategy for writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Leave flushing to the OS (fastest)
    Never,

    /// fsync after every append and before every rename (safest)
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./books.dat"),
            sync_mode: SyncMode::Never,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
