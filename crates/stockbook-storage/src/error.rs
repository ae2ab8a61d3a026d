//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / CoreError (invariant broken on load)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the file path                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in cli) ← What the user sees                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these leave the in-memory store half-changed: a failed load
//! returns no store at all, a failed save leaves the store dirty.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Inventory file errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The inventory file does not exist.
    ///
    /// Callers usually treat this as "start with an empty store"
    /// (see [`InventoryFile::load_or_empty`](crate::InventoryFile::load_or_empty)).
    #[error("Inventory file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file is not valid JSON, does not match the document shape, or a
    /// product breaks a ledger invariant.
    #[error("Malformed inventory file {}: {reason}", path.display())]
    MalformedData { path: PathBuf, reason: String },

    /// Reading or writing the file failed (permissions, disk full, ...).
    #[error("Failed to access inventory file {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StorageError::MalformedData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Persistence {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_path() {
        let err = StorageError::FileNotFound(PathBuf::from("data/estoque.json"));
        assert_eq!(err.to_string(), "Inventory file not found: data/estoque.json");

        let err = StorageError::malformed("estoque.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Malformed inventory file estoque.json: expected value at line 1 column 1"
        );
    }
}
