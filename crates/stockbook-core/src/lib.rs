//! # stockbook-core: Pure Inventory Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook. It owns the in-memory product
//! ledger and every rule that governs it, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockbook CLI (apps/cli)                     │   │
//! │  │    add ──► list ──► search ──► update ──► report ──► clear     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │   query   │  │  safety   │  │   │
//! │  │   │  Product  │  │ add/find  │  │ list/sort │  │  clear &  │  │   │
//! │  │   │  Report   │  │ upd/rm    │  │  report   │  │  reload   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO PROMPTS • DETERMINISTIC RULES          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockbook-storage (Persistence)                  │   │
//! │  │              estoque.json load/save, atomic writes              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductUpdate, SortKey, ReportSummary)
//! - [`money`] - Money type with integer cents
//! - [`validation`] - Numeric input parsing and field rules
//! - [`store`] - The ProductStore and its mutating operations
//! - [`query`] - Read-only listing, categories, sorting and reports
//! - [`safety`] - Confirmation state machines for destructive operations
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::validation::{parse_price, parse_quantity};
//! use stockbook_core::ProductStore;
//!
//! let mut store = ProductStore::new();
//! let price = parse_price("7,99").unwrap();
//! let quantity = parse_quantity("12").unwrap();
//!
//! let product = store.add("Mouse", price, quantity, "Periféricos").unwrap();
//! assert_eq!(product.id, 1);
//! assert_eq!(product.price.cents(), 799);
//! assert!(store.is_dirty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod query;
pub mod safety;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use safety::{ClearOutcome, ClearProtocol, ClearState, ClearStep, ReloadChoice};
pub use store::ProductStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products with a quantity strictly below this value are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Literal word that must be typed to confirm clearing the whole inventory.
pub const CLEAR_CONFIRMATION_WORD: &str = "ZERAR";

/// Category assigned when a product is added with a blank category.
pub const DEFAULT_CATEGORY: &str = "Sem categoria";

/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum category length, in characters.
pub const MAX_CATEGORY_LEN: usize = 100;
