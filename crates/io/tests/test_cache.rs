//! Integration test: file memoization keyed by path, mtime and length.

use std::cell::Cell;
use std::fs;
use std::sync::Arc;

use janus_io::{FileCache, IoError};

fn load_text(path: &std::path::Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[test]
fn second_lookup_is_a_hit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "hello").unwrap();

    let cache = FileCache::new();
    let calls = Cell::new(0);
    let load = |p: &std::path::Path| {
        calls.set(calls.get() + 1);
        load_text(p)
    };

    let first = cache.get_or_load(&path, load).unwrap();
    let second = cache.get_or_load(&path, load).unwrap();
    assert_eq!(*first, "hello");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}

#[test]
fn changed_file_is_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "short").unwrap();

    let cache = FileCache::new();
    let before = cache.get_or_load(&path, load_text).unwrap();

    // Different length, so the fingerprint changes even within one mtime tick.
    fs::write(&path, "considerably longer").unwrap();
    let after = cache.get_or_load(&path, load_text).unwrap();

    assert_eq!(*before, "short");
    assert_eq!(*after, "considerably longer");
    assert_eq!(cache.len(), 1);
}

#[test]
fn equivalent_paths_share_an_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "x").unwrap();
    let dotted = dir.path().join(".").join("a.txt");

    let cache = FileCache::new();
    let a = cache.get_or_load(&path, load_text).unwrap();
    let b = cache.get_or_load(&dotted, load_text).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn clear_and_invalidate() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let cache = FileCache::new();
    cache.get_or_load(&a, load_text).unwrap();
    cache.get_or_load(&b, load_text).unwrap();
    assert_eq!(cache.len(), 2);

    assert!(cache.invalidate(&a));
    assert!(!cache.invalidate(&a));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}
