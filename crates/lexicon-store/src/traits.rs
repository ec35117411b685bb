use crate::entry::Entry;
use crate::error::StoreResult;
use crate::persist::Entries;

/// Shared word-to-definition store.
///
/// All implementations must satisfy these invariants:
/// - Words are exact, case-sensitive keys. No normalization happens here;
///   callers normalize at their own boundary.
/// - Every word maps to at most one entry. `add` replaces the previous entry
///   wholesale.
/// - Readers never observe a map that is mid-mutation.
/// - Mutations are applied in memory before any persistence is attempted. A
///   persistence error never rolls the in-memory change back.
pub trait Dictionary: Send + Sync {
    /// Insert or overwrite the definition for `word`.
    ///
    /// Returns `Err` only if persisting the new state failed. The entry is in
    /// memory either way.
    fn add(&self, word: &str, definition: &str) -> StoreResult<()>;

    /// Look up `word`.
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if absent.
    fn get(&self, word: &str) -> StoreResult<Entry>;

    /// Delete `word`. Returns `true` if the word was present.
    ///
    /// Removing an absent word is not an error.
    fn remove(&self, word: &str) -> StoreResult<bool>;

    /// Snapshot of every entry, ordered by word.
    fn list(&self) -> Entries;

    /// Write the current state to durable storage, if the backend has any.
    fn flush(&self) -> StoreResult<()>;

    /// Number of stored words.
    fn len(&self) -> usize;

    /// Sorted list of every stored word.
    fn words(&self) -> Vec<String> {
        self.list().into_keys().collect()
    }

    /// Returns `true` if the dictionary holds no words.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `word` is present.
    fn contains(&self, word: &str) -> bool {
        self.get(word).is_ok()
    }
}
