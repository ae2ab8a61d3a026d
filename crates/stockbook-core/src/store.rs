//! # Product Store
//!
//! The in-memory, ordered collection of products plus its dirty flag and
//! last-updated timestamp.
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operations                                     │
//! │                                                                         │
//! │  Operation        Lookup            Mutation            Dirty  Touched  │
//! │  ─────────        ──────            ────────            ─────  ───────  │
//! │  add()            dup scan O(n)     push O(1)           yes    yes      │
//! │  find()           scan O(n)         -                   no     no       │
//! │  update()         scan O(n)         fields O(1)         yes    yes      │
//! │  remove()         scan O(n)         shift O(n)          yes    yes      │
//! │  clear()          -                 drop all            if >0  if >0    │
//! │                                                                         │
//! │  Every failing call leaves the store exactly as it was.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A session creates one store (empty or loaded from file), owns it for its
//! whole lifetime and passes it by reference to every operation. There is no
//! global store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductUpdate};
use crate::validation::{validate_category, validate_price, validate_product_name};
use crate::DEFAULT_CATEGORY;

/// The inventory ledger.
///
/// ## Invariants
/// - Product ids are pairwise distinct and positive
/// - Product names are pairwise distinct ignoring case
/// - `dirty` is false right after a save or a fresh load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStore {
    pub(crate) products: Vec<Product>,
    pub(crate) dirty: bool,
    pub(crate) last_updated: DateTime<Utc>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Creates an empty, clean store.
    pub fn new() -> Self {
        ProductStore {
            products: Vec::new(),
            dirty: false,
            last_updated: Utc::now(),
        }
    }

    /// Rebuilds a store from persisted records, preserving their order.
    ///
    /// The whole batch is rejected if any record breaks a store invariant;
    /// nothing is partially applied. The resulting store is clean.
    pub fn from_records(products: Vec<Product>, last_updated: DateTime<Utc>) -> CoreResult<Self> {
        let mut ids = HashSet::with_capacity(products.len());
        let mut names = HashSet::with_capacity(products.len());

        for product in &products {
            if product.id == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "id".to_string(),
                }
                .into());
            }
            if !ids.insert(product.id) {
                return Err(CoreError::DuplicateId(product.id));
            }

            let name = validate_product_name(&product.name)?;
            if !names.insert(name.to_lowercase()) {
                return Err(CoreError::DuplicateProduct(product.name.clone()));
            }

            validate_category(&product.category)?;
            validate_price(product.price)?;
        }

        debug!(count = products.len(), "Rebuilt store from records");

        Ok(ProductStore {
            products,
            dirty: false,
            last_updated,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Products in store order.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether the in-memory state has diverged from the last saved file.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// When the store content last changed.
    #[inline]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Marks the store as matching the file on disk. Called after a save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Id the next added product will receive.
    ///
    /// Fails with [`CoreError::IdsExhausted`] once the largest id is `u64::MAX`.
    pub fn next_id(&self) -> CoreResult<u64> {
        match self.products.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(CoreError::IdsExhausted),
        }
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.last_updated = Utc::now();
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.products.iter().position(|p| p.has_name(name))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds a new product at the end of the store.
    ///
    /// ## Behavior
    /// - Name and category are trimmed; a blank category becomes
    ///   [`DEFAULT_CATEGORY`]
    /// - Fails with [`CoreError::DuplicateProduct`] if the name exists
    ///   ignoring case
    /// - Assigns `max(id) + 1` (or 1) and stamps `registered_at`
    ///
    /// ## Example
    /// ```rust
    /// use stockbook_core::{CoreError, Money, ProductStore};
    ///
    /// let mut store = ProductStore::new();
    /// store.add("Mouse", Money::from_cents(4990), 5, "Periféricos").unwrap();
    ///
    /// let dup = store.add("mouse", Money::from_cents(100), 1, "");
    /// assert!(matches!(dup, Err(CoreError::DuplicateProduct(_))));
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn add(
        &mut self,
        name: &str,
        price: Money,
        quantity: u32,
        category: &str,
    ) -> CoreResult<Product> {
        let name = validate_product_name(name)?;
        if self.position(&name).is_some() {
            return Err(CoreError::DuplicateProduct(name));
        }

        validate_price(price)?;
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            validate_category(category)?
        };

        let product = Product {
            id: self.next_id()?,
            name,
            price,
            quantity,
            category,
            registered_at: Utc::now(),
        };

        info!(id = product.id, name = %product.name, price = %product.price, quantity, "Product added");

        self.products.push(product.clone());
        self.touch();
        Ok(product)
    }

    /// Finds a product by exact name, ignoring case.
    ///
    /// Returns the first match in store order.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.position(name).map(|idx| &self.products[idx])
    }

    /// Applies a partial update to the named product.
    ///
    /// Every provided field is validated before any is written, so a rejected
    /// update changes nothing. Omitted (or blank category) fields keep their
    /// current value. Name and id never change.
    pub fn update(&mut self, name: &str, update: ProductUpdate) -> CoreResult<Product> {
        let idx = self
            .position(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.trim().to_string()))?;

        if let Some(price) = update.price {
            validate_price(price)?;
        }
        let category = match update.category.as_deref() {
            Some(c) if !c.trim().is_empty() => Some(validate_category(c)?),
            _ => None,
        };

        let product = &mut self.products[idx];
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(category) = category {
            product.category = category;
        }
        let updated = product.clone();

        info!(id = updated.id, name = %updated.name, "Product updated");

        self.touch();
        Ok(updated)
    }

    /// Removes the named product, keeping the relative order of the rest.
    ///
    /// Confirmation is the caller's job; this removes unconditionally.
    pub fn remove(&mut self, name: &str) -> CoreResult<Product> {
        let idx = self
            .position(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.trim().to_string()))?;

        let removed = self.products.remove(idx);
        info!(id = removed.id, name = %removed.name, "Product removed");

        self.touch();
        Ok(removed)
    }

    /// Removes every product and returns how many were removed.
    ///
    /// Clearing an empty store is a valid no-op and does not dirty it.
    pub fn clear(&mut self) -> usize {
        let removed = self.products.len();
        if removed == 0 {
            return 0;
        }

        self.products = Vec::new();
        info!(removed, "Store cleared");

        self.touch();
        removed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
