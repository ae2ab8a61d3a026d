//! # Inventory File
//!
//! Load, save and reload of the inventory document.
//!
//! ## Save Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(store)                                                            │
//! │     │                                                                   │
//! │     ├── serialize InventoryDocument (pretty, UTF-8)                     │
//! │     ├── create sibling temp file in the same directory                  │
//! │     ├── write + fsync                                                   │
//! │     ├── rename over estoque.json     ← readers never see half a file    │
//! │     └── store.mark_clean()                                              │
//! │                                                                         │
//! │  Any failure before the rename leaves the old file and a dirty store.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reload With Unsaved Changes
//! ```text
//!  store dirty? ──no──► load
//!       │
//!      yes ──► decide() ──► SaveThenReload   ──► save ──► load
//!                      ├──► DiscardAndReload ──────────► load
//!                      └──► Abort            ──► store untouched
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use stockbook_core::{ProductStore, ReloadChoice};

use crate::document::InventoryDocument;
use crate::error::{StorageError, StorageResult};

/// Whether the store holds changes that are not in the file yet.
#[inline]
pub fn has_unsaved_changes(store: &ProductStore) -> bool {
    store.is_dirty()
}

/// Result of [`InventoryFile::reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The store was replaced by the file contents.
    Reloaded { products: usize, saved_first: bool },
    /// The caller chose to keep the in-memory store.
    Aborted,
}

/// Handle to the inventory JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFile {
    path: PathBuf,
}

impl InventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        InventoryFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the store from the file.
    ///
    /// ## Errors
    /// - [`StorageError::FileNotFound`] if there is no file
    /// - [`StorageError::MalformedData`] if the JSON is invalid or any product
    ///   breaks a store invariant (the whole load is rejected)
    /// - [`StorageError::Persistence`] for other read failures
    pub fn load(&self) -> StorageResult<ProductStore> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::FileNotFound(self.path.clone()));
            }
            Err(e) => return Err(StorageError::persistence(&self.path, e)),
        };

        let document: InventoryDocument = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::malformed(&self.path, e))?;
        let store = document
            .into_store()
            .map_err(|reason| StorageError::malformed(&self.path, reason))?;

        info!(path = %self.path.display(), products = store.len(), "Inventory loaded");
        Ok(store)
    }

    /// Loads the store, starting empty when the file does not exist yet.
    pub fn load_or_empty(&self) -> StorageResult<ProductStore> {
        match self.load() {
            Err(StorageError::FileNotFound(path)) => {
                warn!(path = %path.display(), "Inventory file not found, starting empty");
                Ok(ProductStore::new())
            }
            other => other,
        }
    }

    /// Writes the store to the file atomically and marks it clean.
    ///
    /// On failure the previous file is left in place and the store is not
    /// modified.
    pub fn save(&self, store: &mut ProductStore) -> StorageResult<()> {
        let document = InventoryDocument::from_store(store);
        let mut bytes = serde_json::to_vec_pretty(&document).map_err(|e| {
            StorageError::persistence(&self.path, io::Error::new(io::ErrorKind::Other, e))
        })?;
        bytes.push(b'\n');

        write_atomically(&self.path, &bytes)
            .map_err(|e| StorageError::persistence(&self.path, e))?;

        store.mark_clean();
        info!(path = %self.path.display(), products = store.len(), "Inventory saved");
        Ok(())
    }

    /// Replaces `store` with the file contents.
    ///
    /// `decide` is only called when the store has unsaved changes. A missing
    /// file reloads as an empty store. If the save or the load fails, `store`
    /// keeps its current contents.
    pub fn reload<F>(&self, store: &mut ProductStore, decide: F) -> StorageResult<ReloadOutcome>
    where
        F: FnOnce() -> ReloadChoice,
    {
        let mut saved_first = false;

        if has_unsaved_changes(store) {
            let choice = decide();
            debug!(?choice, "Reload requested with unsaved changes");

            match choice {
                ReloadChoice::Abort => return Ok(ReloadOutcome::Aborted),
                ReloadChoice::SaveThenReload => {
                    self.save(store)?;
                    saved_first = true;
                }
                ReloadChoice::DiscardAndReload => {
                    warn!(path = %self.path.display(), "Discarding unsaved changes");
                }
            }
        }

        let fresh = self.load_or_empty()?;
        *store = fresh;

        Ok(ReloadOutcome::Reloaded {
            products: store.len(),
            saved_first,
        })
    }
}

/// Write-then-rename through a temp file in the target's directory.
fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
