//! # stockbook-storage: Persistence Layer for Stockbook
//!
//! Reads and writes the inventory JSON document and tracks when the
//! in-memory store has drifted from it.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Data Flow                              │
//! │                                                                         │
//! │  ProductStore (stockbook-core)                                         │
//! │       │ ▲                                                               │
//! │  save │ │ load                                                          │
//! │       ▼ │                                                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                stockbook-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐          ┌──────────────────────────┐ │   │
//! │  │   │  document.rs       │          │  file.rs                 │ │   │
//! │  │   │  InventoryDocument │◄────────►│  InventoryFile           │ │   │
//! │  │   │  produtos / preco  │          │  temp file → rename      │ │   │
//! │  │   └────────────────────┘          └──────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  estoque.json                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stockbook_core::Money;
//! use stockbook_storage::InventoryFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = InventoryFile::new("estoque.json");
//! let mut store = file.load_or_empty()?;
//!
//! store.add("Mouse", Money::from_cents(4990), 5, "Periféricos")?;
//! file.save(&mut store)?;
//! assert!(!store.is_dirty());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{InventoryDocument, ProductRecord};
pub use error::{StorageError, StorageResult};
pub use file::{has_unsaved_changes, InventoryFile, ReloadOutcome};

/// File name used when no path is configured.
pub const DEFAULT_INVENTORY_FILE: &str = "estoque.json";
