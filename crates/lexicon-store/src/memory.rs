use std::sync::{PoisonError, RwLock};

use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::persist::Entries;
use crate::traits::Dictionary;

/// In-memory dictionary with no backing file.
///
/// Intended for tests and embedding. Same locking discipline as
/// [`FileDictionary`](crate::FileDictionary); `flush` is a no-op.
pub struct InMemoryDictionary {
    entries: RwLock<Entries>,
}

impl InMemoryDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::from_entries(Entries::new())
    }

    /// Create a dictionary pre-populated with `entries`.
    pub fn from_entries(entries: Entries) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl Default for InMemoryDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for InMemoryDictionary {
    fn add(&self, word: &str, definition: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(word.to_owned(), Entry::new(word, definition));
        Ok(())
    }

    fn get(&self, word: &str) -> StoreResult<Entry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(word)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(word.to_owned()))
    }

    fn remove(&self, word: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(word).is_some())
    }

    fn list(&self) -> Entries {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn flush(&self) -> StoreResult<()> {
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl std::fmt::Debug for InMemoryDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDictionary")
            .field("entry_count", &self.len())
            .finish()
    }
}
