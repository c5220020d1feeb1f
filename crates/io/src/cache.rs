//! Memoization of values loaded from files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use tracing::debug;

use crate::error::IoError;

/// What identifies one version of a file on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fingerprint {
    modified: SystemTime,
    len: u64,
}

struct Entry<T> {
    fingerprint: Fingerprint,
    value: Arc<T>,
}

/// Caches the result of loading a file until the file changes.
///
/// Entries are keyed by canonical path and validated against the file's
/// modification time and length on every lookup, so an edited file is
/// reloaded. Values are shared as [`Arc`]s.
///
/// Only worth it for long-lived callers (a server or dashboard answering
/// many requests from one process); a one-shot command should call its
/// loader directly.
///
/// # Example
///
/// ```ignore
/// let cache: FileCache<ModelBundle> = FileCache::new();
/// let bundle = cache.get_or_load(path, read_bundle)?;
/// ```
pub struct FileCache<T> {
    entries: Mutex<HashMap<PathBuf, Entry<T>>>,
}

impl<T> Default for FileCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FileCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Entry<T>>> {
        // Entries are only ever replaced whole, so a poisoned map is usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value for `path`, calling `loader` when there is no
    /// entry or the file changed since it was loaded.
    ///
    /// The lock is not held while `loader` runs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `path` does not exist, otherwise
    /// whatever `loader` returns.
    pub fn get_or_load<E, F>(&self, path: &Path, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&Path) -> Result<T, E>,
        E: From<IoError>,
    {
        let (key, fingerprint) = fingerprint(path)?;

        if let Some(entry) = self.lock().get(&key)
            && entry.fingerprint == fingerprint
        {
            debug!(path = %key.display(), "cache hit");
            return Ok(Arc::clone(&entry.value));
        }

        debug!(path = %key.display(), "cache miss");
        let value = Arc::new(loader(&key)?);
        self.lock().insert(
            key,
            Entry {
                fingerprint,
                value: Arc::clone(&value),
            },
        );
        Ok(value)
    }

    /// Drops the entry for `path`. Returns `true` if there was one.
    pub fn invalidate(&self, path: &Path) -> bool {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.lock().remove(&key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn fingerprint(path: &Path) -> Result<(PathBuf, Fingerprint), IoError> {
    let key = fs::canonicalize(path).map_err(|e| IoError::from_io(path, e))?;
    let metadata = fs::metadata(&key).map_err(|e| IoError::from_io(path, e))?;
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    Ok((
        key,
        Fingerprint {
            modified,
            len: metadata.len(),
        },
    ))
}
