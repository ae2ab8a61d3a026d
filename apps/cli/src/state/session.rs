//! # Inventory Session
//!
//! Owns the single in-memory store for the lifetime of one process, together
//! with its file and the clear-all protocol. Every command goes through here.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  InventorySession::open(config)                                         │
//! │       │   load_or_empty(estoque.json)  ← missing file = empty store     │
//! │       ▼                                                                 │
//! │  add_product / update_product / sort_products / ...                     │
//! │       │   raw text is parsed here (comma or dot decimals)               │
//! │       ▼                                                                 │
//! │  save_if_dirty()                       ← "save on exit"                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failed operations leave the store exactly as it was.

use stockbook_core::validation::{parse_price, parse_quantity};
use stockbook_core::{
    ClearOutcome, ClearProtocol, Product, ProductStore, ProductUpdate, ReloadChoice,
    ReportSummary, SortKey,
};
use stockbook_storage::{has_unsaved_changes, InventoryFile, ReloadOutcome};
use tracing::{debug, info};

use super::ConfigState;
use crate::error::{ApiError, ApiResult};

/// Raw field input for [`InventorySession::update_product`].
///
/// `None` or blank text leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<String>,
}

impl ProductFields {
    /// Parses the provided fields into a typed update.
    ///
    /// Fails on the first unparsable number without touching anything.
    pub fn into_update(self) -> ApiResult<ProductUpdate> {
        let mut update = ProductUpdate::new();

        if let Some(raw) = non_blank(self.price) {
            update = update.with_price(parse_price(&raw)?);
        }
        if let Some(raw) = non_blank(self.quantity) {
            update = update.with_quantity(parse_quantity(&raw)?);
        }
        if let Some(category) = non_blank(self.category) {
            update = update.with_category(category);
        }

        Ok(update)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One open inventory.
#[derive(Debug)]
pub struct InventorySession {
    config: ConfigState,
    file: InventoryFile,
    store: ProductStore,
    clear: ClearProtocol,
}

impl InventorySession {
    /// Opens the configured inventory file, starting empty if it is missing.
    pub fn open(config: ConfigState) -> ApiResult<Self> {
        let file = InventoryFile::new(&config.inventory_file);
        let store = file.load_or_empty()?;
        Ok(Self::with_store(config, store))
    }

    /// Wraps an existing store without touching the file.
    pub fn with_store(config: ConfigState, store: ProductStore) -> Self {
        InventorySession {
            file: InventoryFile::new(&config.inventory_file),
            clear: ClearProtocol::new(config.clear_word.clone()),
            config,
            store,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// The word the clear-all protocol expects.
    pub fn clear_word(&self) -> &str {
        self.clear.expected_word()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        has_unsaved_changes(&self.store)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product from raw text input.
    ///
    /// Price and quantity accept comma or dot decimals.
    pub fn add_product(
        &mut self,
        name: &str,
        price: &str,
        quantity: &str,
        category: &str,
    ) -> ApiResult<Product> {
        let price = parse_price(price)?;
        let quantity = parse_quantity(quantity)?;
        Ok(self.store.add(name, price, quantity, category)?)
    }

    /// Products in store order, optionally only one category.
    pub fn list_products(&self, category: Option<&str>) -> Vec<Product> {
        self.store.list(category).cloned().collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.distinct_categories()
    }

    /// Finds a product by name, ignoring case.
    pub fn search_product(&self, name: &str) -> ApiResult<Product> {
        self.store
            .find(name)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Product", name.trim()))
    }

    pub fn update_product(&mut self, name: &str, fields: ProductFields) -> ApiResult<Product> {
        let update = fields.into_update()?;
        Ok(self.store.update(name, update)?)
    }

    pub fn remove_product(&mut self, name: &str) -> ApiResult<Product> {
        Ok(self.store.remove(name)?)
    }

    /// Report using the configured low-stock threshold.
    pub fn build_report(&self) -> ReportSummary {
        self.store.report_with_threshold(self.config.low_stock_threshold)
    }

    /// Sorts by `key`; `None` uses the key's usual direction.
    pub fn sort_products(&mut self, key: SortKey, ascending: Option<bool>) -> bool {
        let ascending = ascending.unwrap_or_else(|| key.default_ascending());
        self.store.sort(key, ascending);
        ascending
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn save(&mut self) -> ApiResult<()> {
        self.file.save(&mut self.store)?;
        Ok(())
    }

    /// Saves only when there is something to save. Returns whether it wrote.
    pub fn save_if_dirty(&mut self) -> ApiResult<bool> {
        if !self.has_unsaved_changes() {
            debug!("No unsaved changes");
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Replaces the store with the file contents, discarding any changes.
    ///
    /// A missing file loads as an empty store. On error the current store is
    /// kept.
    pub fn load(&mut self) -> ApiResult<usize> {
        self.store = self.file.load_or_empty()?;
        Ok(self.store.len())
    }

    /// Reloads from file, asking `decide` only when there are unsaved changes.
    pub fn reload<F>(&mut self, decide: F) -> ApiResult<ReloadOutcome>
    where
        F: FnOnce() -> ReloadChoice,
    {
        Ok(self.file.reload(&mut self.store, decide)?)
    }

    // =========================================================================
    // Clear
    // =========================================================================

    /// Clears the inventory if both confirmation steps pass.
    ///
    /// `intent_affirmed` answers "really clear everything?", `typed_word` is
    /// what the user typed for the confirmation word.
    pub fn clear_with_confirmation(
        &mut self,
        intent_affirmed: bool,
        typed_word: &str,
    ) -> ApiResult<ClearOutcome> {
        let outcome = self.clear.run(&mut self.store, intent_affirmed, typed_word)?;
        info!(?outcome, "Clear requested");
        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
