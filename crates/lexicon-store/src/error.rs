use std::path::PathBuf;

/// Errors from dictionary operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested word is not in the dictionary.
    #[error("word not found: {0}")]
    NotFound(String),

    /// The backing file could not be written. The in-memory change that
    /// triggered the write has already been applied.
    #[error("failed to persist dictionary to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding the entries as JSON failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for the expected, recoverable "no such word" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if the error came from writing the backing file.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persist { .. } | Self::Serialization(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound("go".into());
        assert_eq!(err.to_string(), "word not found: go");
        assert!(err.is_not_found());
        assert!(!err.is_persistence());
    }

    #[test]
    fn persist_display_names_path() {
        let err = StoreError::Persist {
            path: PathBuf::from("/nope/dictionary.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/dictionary.json"));
        assert!(msg.contains("denied"));
        assert!(err.is_persistence());
    }
}
