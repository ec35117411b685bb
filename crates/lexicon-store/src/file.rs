use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::persist::{self, Entries};
use crate::traits::Dictionary;

/// Dictionary mirrored to a JSON file.
///
/// The whole map is re-serialized to the backing file after every mutation.
/// A single `RwLock` guards the map: `add`, `remove` and `flush` hold the
/// write lock across both the map change and the file write, so mutations and
/// their saves are serialized as one unit. `get` and `list` share the read
/// lock.
///
/// Create exactly one instance per backing file and share it (e.g. behind an
/// `Arc`). Two instances on the same path would overwrite each other's saves.
pub struct FileDictionary {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl FileDictionary {
    /// Open the dictionary stored at `path`.
    ///
    /// Never fails. A missing file yields an empty dictionary; an unreadable or
    /// corrupt file is logged as a warning and also yields an empty one. The
    /// corrupt file is left untouched until the first mutation overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match persist::load(&path) {
            Ok(Some(entries)) => {
                info!(path = %path.display(), entries = entries.len(), "dictionary loaded");
                entries
            }
            Ok(None) => {
                info!(path = %path.display(), "no dictionary file yet; starting empty");
                Entries::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load dictionary; starting empty");
                Entries::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Path of the backing file. Fixed for the lifetime of the dictionary.
    pub fn backing_path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    // Poisoning is recoverable: the map is only touched by infallible inserts
    // and removes, and the file write comes after.
    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Dictionary for FileDictionary {
    fn add(&self, word: &str, definition: &str) -> StoreResult<()> {
        let mut entries = self.write();
        entries.insert(word.to_owned(), Entry::new(word, definition));
        debug!(word, "entry added");
        persist::save(&self.path, &entries)
    }

    fn get(&self, word: &str) -> StoreResult<Entry> {
        self.read()
            .get(word)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(word.to_owned()))
    }

    fn remove(&self, word: &str) -> StoreResult<bool> {
        let mut entries = self.write();
        let existed = entries.remove(word).is_some();
        debug!(word, existed, "entry removed");
        persist::save(&self.path, &entries)?;
        Ok(existed)
    }

    fn list(&self) -> Entries {
        self.read().clone()
    }

    fn flush(&self) -> StoreResult<()> {
        let entries = self.write();
        persist::save(&self.path, &entries)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

impl std::fmt::Debug for FileDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDictionary")
            .field("path", &self.path)
            .field("entry_count", &self.len())
            .finish()
    }
}
