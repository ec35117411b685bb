//! File-backed word/definition store.
//!
//! This crate owns the authoritative mapping from word to definition. The map
//! lives in memory behind a reader-writer lock and is mirrored, in full, to a
//! JSON file after every mutation.
//!
//! # Backends
//!
//! All backends implement the [`Dictionary`] trait:
//!
//! - [`FileDictionary`] -- JSON-file-backed store, one per process
//! - [`InMemoryDictionary`] -- map-only store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Words are exact, case-sensitive keys. Normalization ([`normalize_word`])
//!    is the caller's job.
//! 2. Only `add` and `remove` change state, and only they (plus an explicit
//!    `flush`) write the file.
//! 3. A mutation and the save it triggers run under one write lock.
//! 4. Saves replace the file atomically (temp file + rename).
//! 5. A failed save is reported once and never rolls back the in-memory
//!    change. The next successful save catches the file up.
//! 6. Opening never fails: a missing or corrupt file yields an empty store.

pub mod entry;
pub mod error;
pub mod file;
pub mod memory;
pub mod persist;
pub mod traits;
pub mod word;

// Re-export primary types at crate root for ergonomic imports.
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use file::FileDictionary;
pub use memory::InMemoryDictionary;
pub use persist::Entries;
pub use traits::Dictionary;
pub use word::normalize_word;
