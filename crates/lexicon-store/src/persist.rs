//! Whole-file JSON persistence for dictionary entries.
//!
//! On-disk format is a single UTF-8 JSON object, indented with four spaces:
//!
//! ```text
//! {
//!     "<word>": { "word": "<word>", "definition": "<text>" },
//!     ...
//! }
//! ```
//!
//! Saves never write the backing file in place. The full map is written to a
//! temporary file in the same directory, synced, and renamed over the target,
//! so a reader only ever sees the previous file or the complete new one. An
//! existing file's permissions carry over to its replacement.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};

/// Word-ordered mapping from word to entry.
pub type Entries = BTreeMap<String, Entry>;

/// Read and decode the backing file.
///
/// Returns `Ok(None)` if the file does not exist. Each entry is re-keyed from
/// its map key, whatever word it carries in the file.
pub fn load(path: &Path) -> StoreResult<Option<Entries>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let raw: Entries = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;

    let entries = raw
        .into_iter()
        .map(|(word, entry)| {
            let entry = entry.keyed(&word);
            (word, entry)
        })
        .collect();
    Ok(Some(entries))
}

/// Serialize `entries` and atomically replace the file at `path`.
pub fn save(path: &Path, entries: &Entries) -> StoreResult<()> {
    let persist_err = |source: io::Error| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(persist_err)?;

    let bytes = encode(entries)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(&bytes).map_err(persist_err)?;
    match fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(persist_err)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(persist_err(e)),
    }
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;

    debug!(path = %path.display(), entries = entries.len(), bytes = bytes.len(), "dictionary saved");
    Ok(())
}

fn encode(entries: &Entries) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}
