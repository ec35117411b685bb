use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored definition together with the word it was filed under.
///
/// Entries are immutable: an update replaces the whole entry. The `word`
/// field exists for symmetry with the wire format and is never trusted as a
/// key; the dictionary map key is authoritative and is written back into the
/// entry whenever one is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, alias = "mot")]
    word: String,
    definition: String,
}

impl Entry {
    /// Create an entry for `word`.
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Re-file this entry under `key`, discarding whatever word it carried.
    pub(crate) fn keyed(self, key: &str) -> Self {
        if self.word == key {
            return self;
        }
        Self {
            word: key.to_owned(),
            definition: self.definition,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}
