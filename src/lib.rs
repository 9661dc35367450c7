//! # Bookshelf
//!
//! A single-user book record store with:
//! - An append-only binary file as the only persistent state
//! - Whole-file rewrite with atomic rename for updates and deletes
//! - Stable sorting and CSV export over in-memory snapshots
//! - An interactive menu front end
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Controller (menu)                         │
//! │              stdin prompts / stdout output                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  BookStore trait
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  FileStore  │          │ MemoryStore │
//!   │ (books.dat) │          │  (RwLock)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ Record codec│
//!   │  (bincode)  │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod query;
pub mod export;
pub mod store;
pub mod controller;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BookshelfError, Result};
pub use config::{Config, SyncMode};
pub use record::Record;
pub use query::SortKey;
pub use store::{BookStore, FileStore, MemoryStore};
pub use controller::Controller;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Bookshelf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
