//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductUpdate  │   │    SortKey      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  price?         │   │  Name     ↑     │       │
//! │  │  name           │   │  quantity?      │   │  Price    ↑     │       │
//! │  │  price (Money)  │   │  category?      │   │  Quantity ↓     │       │
//! │  │  quantity (u32) │   └─────────────────┘   │  Category ↑     │       │
//! │  │  category       │                         └─────────────────┘       │
//! │  │  registered_at  │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │  ReportSummary  │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `id`: assigned by the store, never reused while the product exists
//! - `name`: the lookup key, unique ignoring case

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A single inventory record.
///
/// Products are only created by [`ProductStore::add`](crate::ProductStore::add)
/// or rebuilt from a persisted file, and only mutated through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier (max existing id + 1).
    pub id: u64,

    /// Display name, unique ignoring case.
    pub name: String,

    /// Unit price in cents.
    pub price: Money,

    /// Units in stock.
    pub quantity: u32,

    /// Free-form category label.
    pub category: String,

    /// When the product was added.
    pub registered_at: DateTime<Utc>,
}

impl Product {
    /// Value of the units in stock (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Whether the quantity is strictly below `threshold`.
    #[inline]
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    /// Case-insensitive exact name match.
    pub fn has_name(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    /// Case-insensitive exact category match.
    pub fn in_category(&self, category: &str) -> bool {
        eq_ignore_case(&self.category, category)
    }
}

/// Unicode-aware case-insensitive equality (`"Açúcar" == "AÇÚCAR"`).
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// Product Update
// =============================================================================

/// Partial update for an existing product.
///
/// `None` means "keep the current value". It never means "clear".
/// Name and id are not part of the update: they are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<Money>,
    pub quantity: Option<u32>,
    /// A blank category is treated the same as `None`.
    pub category: Option<String>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Field used to re-order the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive, A-Z by default.
    Name,
    /// Lowest first by default.
    Price,
    /// Largest stock first by default.
    Quantity,
    /// Case-insensitive, A-Z by default.
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Price,
        SortKey::Quantity,
        SortKey::Category,
    ];

    /// The direction the classic inventory menu used for this key.
    pub const fn default_ascending(&self) -> bool {
        !matches!(self, SortKey::Quantity)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Quantity => "quantity",
            SortKey::Category => "category",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort key".to_string(),
                allowed: SortKey::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Report
// =============================================================================

/// Aggregate quantity held under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Spelling of the first product seen in this category.
    pub category: String,
    pub quantity: u64,
}

/// Statistics computed by [`ProductStore::report`](crate::ProductStore::report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_products: usize,

    /// Σ quantity.
    pub total_quantity: u64,

    /// Σ price × quantity.
    pub total_value: Money,

    /// Threshold the low-stock list was computed with.
    pub low_stock_threshold: u32,

    /// Products below the threshold, in store order.
    pub low_stock: Vec<Product>,

    /// Category with the highest aggregate quantity (first encountered wins ties).
    pub top_category: Option<CategoryTotal>,

    pub most_expensive: Option<Product>,
    pub cheapest: Option<Product>,
    pub largest_stock: Option<Product>,

    pub last_updated: DateTime<Utc>,
}

impl ReportSummary {
    #[inline]
    pub fn low_stock_count(&self) -> usize {
        self.low_stock.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_products == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
