//! Tests for FileStore
//!
//! These tests verify:
//! - Opening creates directories and files without clobbering content
//! - Append order, duplicate rejection, and append-only growth
//! - Update/remove via full rewrite, including id changes
//! - Failed rewrites leave the live file intact
//! - Persistence across reopen and tolerance of corrupt tails

use std::fs;
use std::path::PathBuf;

use bookshelf::config::{Config, SyncMode};
use bookshelf::record::{self, Record};
use bookshelf::{BookStore, BookshelfError, FileStore, SortKey};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.dat");
    let store = FileStore::open_path(&path).unwrap();
    (temp_dir, path, store)
}

fn book(id: i32, title: &str, year: i32) -> Record {
    Record::new(id, title, format!("Author {}", id), year, format!("isbn-{}", id), "available")
}

fn ids(records: &[Record]) -> Vec<i32> {
    records.iter().map(|r| r.id).collect()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_parent_and_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join("books.dat");

    let store = FileStore::open_path(&path).unwrap();

    assert!(path.is_file());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_open_keeps_existing_content() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "Kept", 2000)).unwrap();
    let before = fs::read(&path).unwrap();
    drop(store);

    let reopened = FileStore::open_path(&path).unwrap();

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(reopened.get_all().unwrap(), vec![book(1, "Kept", 2000)]);
}

#[test]
fn test_open_with_config_and_sync() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp_dir.path().join("synced.dat"))
        .sync_mode(SyncMode::EveryWrite)
        .build();

    let store = FileStore::open(config).unwrap();
    store.add(book(1, "A", 1)).unwrap();
    store.update(1, book(1, "B", 2)).unwrap();

    assert_eq!(store.config().sync_mode, SyncMode::EveryWrite);
    assert_eq!(store.get_all().unwrap(), vec![book(1, "B", 2)]);
}

#[test]
fn test_missing_file_reads_empty() {
    let (_temp, path, store) = setup_temp_store();
    fs::remove_file(&path).unwrap();

    assert!(store.get_all().unwrap().is_empty());
    assert_eq!(store.find_by_id(1).unwrap(), None);
}

// =============================================================================
// Add Tests
// =============================================================================

#[test]
fn test_add_keeps_append_order() {
    let (_temp, _path, store) = setup_temp_store();
    let books: Vec<Record> = [5, 3, 9, 1, 7].iter().map(|&id| book(id, "T", 2000)).collect();

    for b in &books {
        store.add(b.clone()).unwrap();
    }

    assert_eq!(store.get_all().unwrap(), books);
}

#[test]
fn test_add_is_a_pure_append() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "First", 2001)).unwrap();
    let before = fs::read(&path).unwrap();

    let second = book(2, "Second", 2002);
    store.add(second.clone()).unwrap();
    let after = fs::read(&path).unwrap();

    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.len(), before.len() + record::encoded_len(&second));
}

#[test]
fn test_add_duplicate_fails_without_change() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "Original", 2001)).unwrap();
    let before = fs::read(&path).unwrap();

    let result = store.add(book(1, "Impostor", 1999));

    assert!(matches!(result, Err(BookshelfError::DuplicateId(1))));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.get_all().unwrap(), vec![book(1, "Original", 2001)]);
}

#[test]
fn test_add_id_zero_with_content() {
    let (_temp, _path, store) = setup_temp_store();
    let zero = Record::new(0, "Zero", "", 0, "", "");

    store.add(zero.clone()).unwrap();

    assert_eq!(store.find_by_id(0).unwrap(), Some(zero));
}

#[test]
fn test_add_after_torn_tail_is_visible() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "One", 2001)).unwrap();
    let clean_len = fs::metadata(&path).unwrap().len();

    // Crash mid-append left a partial record behind
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(&[2, 0, 0, 0, 7]);
    fs::write(&path, &bytes).unwrap();

    let second = book(2, "Two", 2002);
    store.add(second.clone()).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![book(1, "One", 2001), second.clone()]);
    assert_eq!(store.find_by_id(2).unwrap(), Some(second.clone()));
    assert!(matches!(store.add(book(2, "Again", 2003)), Err(BookshelfError::DuplicateId(2))));
    assert!(store.scan().unwrap().is_clean());
    assert_eq!(
        fs::metadata(&path).unwrap().len(),
        clean_len + record::encoded_len(&second) as u64
    );
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_by_id() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "One", 2001)).unwrap();
    store.add(book(2, "Two", 2002)).unwrap();

    assert_eq!(store.find_by_id(2).unwrap(), Some(book(2, "Two", 2002)));
    assert_eq!(store.find_by_id(3).unwrap(), None);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_replaces_whole_record_in_place() {
    let (_temp, _path, store) = setup_temp_store();
    for id in 1..=3 {
        store.add(book(id, "Old", 2000)).unwrap();
    }

    let replacement = Record::new(2, "New", "", 1999, "", "loaned");
    store.update(2, replacement.clone()).unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(ids(&all), vec![1, 2, 3]);
    assert_eq!(all[1], replacement);
}

#[test]
fn test_update_can_change_id() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "Moving", 2000)).unwrap();

    store.update(1, book(10, "Moving", 2000)).unwrap();

    assert_eq!(store.find_by_id(1).unwrap(), None);
    assert_eq!(store.find_by_id(10).unwrap(), Some(book(10, "Moving", 2000)));
}

#[test]
fn test_update_missing_fails() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "Only", 2000)).unwrap();
    let before = fs::read(&path).unwrap();

    let result = store.update(2, book(2, "Ghost", 2000));

    assert!(matches!(result, Err(BookshelfError::NotFound(2))));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_onto_other_id_fails() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "One", 2001)).unwrap();
    store.add(book(2, "Two", 2002)).unwrap();

    let result = store.update(1, book(2, "Clash", 2003));

    assert!(matches!(result, Err(BookshelfError::DuplicateId(2))));
    assert_eq!(ids(&store.get_all().unwrap()), vec![1, 2]);
}

#[test]
fn test_rewrite_leaves_no_temp_file() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "One", 2001)).unwrap();

    store.update(1, book(1, "Uno", 2001)).unwrap();

    assert!(!store.temp_path().exists());
}

#[test]
fn test_rewrite_drops_filler_and_tail() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "One", 2001)).unwrap();
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend(record::encode(&Record::default()).unwrap());
    bytes.extend(record::encode(&book(2, "Two", 2002)).unwrap());
    bytes.extend_from_slice(&[1, 2, 3]);
    fs::write(&path, &bytes).unwrap();

    store.update(2, book(2, "Dos", 2002)).unwrap();

    let report = store.scan().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.records, vec![book(1, "One", 2001), book(2, "Dos", 2002)]);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove_then_find() {
    let (_temp, _path, store) = setup_temp_store();
    for id in 1..=4 {
        store.add(book(id, "T", 2000)).unwrap();
    }

    store.remove(3).unwrap();

    assert_eq!(store.find_by_id(3).unwrap(), None);
    assert_eq!(ids(&store.get_all().unwrap()), vec![1, 2, 4]);
}

#[test]
fn test_remove_missing_fails() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "T", 2000)).unwrap();

    assert!(matches!(store.remove(9), Err(BookshelfError::NotFound(9))));
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn test_remove_last_record_leaves_empty_file() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "T", 2000)).unwrap();

    store.remove(1).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_removed_id_can_be_added_again() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "First", 2000)).unwrap();
    store.remove(1).unwrap();

    store.add(book(1, "Second", 2001)).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![book(1, "Second", 2001)]);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_failed_rewrite_keeps_original() {
    let (_temp, path, store) = setup_temp_store();
    store.add(book(1, "Keep", 2000)).unwrap();
    let before = fs::read(&path).unwrap();

    // A directory in the temp file's place makes the write phase fail
    fs::create_dir(store.temp_path()).unwrap();
    let result = store.remove(1);

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.get_all().unwrap(), vec![book(1, "Keep", 2000)]);
}

#[test]
fn test_export_to_unwritable_path_fails() {
    let (temp, _path, store) = setup_temp_store();
    store.add(book(1, "T", 2000)).unwrap();

    let result = store.export_csv(&temp.path().join("missing-dir").join("out.csv"));

    assert!(matches!(result, Err(BookshelfError::Io(_))));
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_sort_by_year_is_stable() {
    let (_temp, path, store) = setup_temp_store();
    for (id, year) in [(1, 2001), (2, 1999), (3, 1999), (4, 2020)] {
        store.add(book(id, "T", year)).unwrap();
    }
    let before = fs::read(&path).unwrap();

    let sorted = store.sort_by(SortKey::Year, true).unwrap();

    assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_sort_descending_by_title() {
    let (_temp, _path, store) = setup_temp_store();
    store.add(book(1, "Beta", 0)).unwrap();
    store.add(book(2, "Alpha", 0)).unwrap();
    store.add(book(3, "Gamma", 0)).unwrap();

    let sorted = store.sort_by(SortKey::Title, false).unwrap();

    assert_eq!(ids(&sorted), vec![3, 1, 2]);
}

// =============================================================================
// Multi-Process Access
// =============================================================================

#[test]
#[ignore = "concurrent access from multiple processes is unsupported"]
fn test_multi_process_interleaving_unsupported() {
    // Two processes appending to or rewriting the same file can lose
    // records or resurrect deleted ones. No behavior is guaranteed.
}
