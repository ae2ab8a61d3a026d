//! # State Module
//!
//! Session state for one CLI invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │   ConfigState    │ ─────► │         InventorySession             │  │
//! │  │                  │        │                                      │  │
//! │  │  inventory_file  │        │  ProductStore   (owned, single)      │  │
//! │  │  threshold       │        │  InventoryFile  (estoque.json)       │  │
//! │  │  clear_word      │        │  ClearProtocol  (double confirm)     │  │
//! │  └──────────────────┘        └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  ConfigState is read-only once the session is open.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState};
pub use session::{InventorySession, ProductFields};
