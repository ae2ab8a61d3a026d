//! # Queries, Sorting and Reports
//!
//! Read-only views over a [`ProductStore`], plus the in-place re-ordering
//! used by the sort command.
//!
//! ## Report Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  report() walks the store ONCE                                          │
//! │                                                                         │
//! │  for each product:                                                      │
//! │     total_quantity += quantity                                          │
//! │     total_value    += price × quantity      (integer cents)             │
//! │     quantity < threshold?  ──► low_stock list                           │
//! │     category totals         ──► top category (first seen wins ties)     │
//! │     price / quantity extremes ──► highlights (first seen wins ties)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::money::Money;
use crate::store::ProductStore;
use crate::types::{CategoryTotal, Product, ReportSummary, SortKey};
use crate::LOW_STOCK_THRESHOLD;

impl ProductStore {
    /// Lazily lists products in store order, optionally filtered by category.
    ///
    /// The category match ignores case; a blank filter lists everything.
    ///
    /// ```rust
    /// use stockbook_core::{Money, ProductStore};
    ///
    /// let mut store = ProductStore::new();
    /// store.add("Mouse", Money::from_cents(100), 1, "Periféricos").unwrap();
    /// store.add("Café", Money::from_cents(100), 1, "Mercearia").unwrap();
    ///
    /// let names: Vec<_> = store.list(Some("periféricos")).map(|p| p.name.as_str()).collect();
    /// assert_eq!(names, ["Mouse"]);
    /// assert_eq!(store.list(None).count(), 2);
    /// ```
    pub fn list<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Product> + 'a {
        let filter = category.map(str::trim).filter(|c| !c.is_empty());
        self.products
            .iter()
            .filter(move |p| filter.map_or(true, |c| p.in_category(c)))
    }

    /// Distinct categories, deduplicated ignoring case and sorted A-Z.
    ///
    /// The spelling of the first product seen in each category is kept.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen = HashMap::new();
        let mut categories = Vec::new();
        for product in &self.products {
            seen.entry(product.category.to_lowercase()).or_insert_with(|| {
                categories.push(product.category.clone());
            });
        }
        categories.sort_by_key(|c| c.to_lowercase());
        categories
    }

    /// Re-orders the store in place with a stable sort.
    ///
    /// ## Ordering
    /// - `Name`, `Category`: case-insensitive
    /// - `Price`, `Quantity`: numeric
    /// - Equal keys keep their current relative order in both directions
    ///
    /// Order is part of the saved file, so sorting dirties the store. It does
    /// not count as a content change and leaves `last_updated` alone.
    pub fn sort(&mut self, key: SortKey, ascending: bool) {
        let compare = |a: &Product, b: &Product| -> Ordering {
            match key {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::Price => a.price.cmp(&b.price),
                SortKey::Quantity => a.quantity.cmp(&b.quantity),
                SortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
            }
        };

        if ascending {
            self.products.sort_by(compare);
        } else {
            self.products.sort_by(|a, b| compare(b, a));
        }

        debug!(key = %key, ascending, count = self.products.len(), "Store sorted");
        self.dirty = true;
    }

    /// Builds a report using the default [`LOW_STOCK_THRESHOLD`].
    pub fn report(&self) -> ReportSummary {
        self.report_with_threshold(LOW_STOCK_THRESHOLD)
    }

    /// Builds a report in a single pass over the store.
    pub fn report_with_threshold(&self, threshold: u32) -> ReportSummary {
        let mut total_quantity: u64 = 0;
        let mut total_value = Money::zero();
        let mut low_stock = Vec::new();

        // (first spelling, aggregate) in first-seen order
        let mut category_totals: Vec<CategoryTotal> = Vec::new();
        let mut category_index: HashMap<String, usize> = HashMap::new();

        let mut most_expensive: Option<&Product> = None;
        let mut cheapest: Option<&Product> = None;
        let mut largest_stock: Option<&Product> = None;

        for product in &self.products {
            total_quantity += u64::from(product.quantity);
            total_value += product.stock_value();

            if product.is_low_stock(threshold) {
                low_stock.push(product.clone());
            }

            let idx = *category_index
                .entry(product.category.to_lowercase())
                .or_insert_with(|| {
                    category_totals.push(CategoryTotal {
                        category: product.category.clone(),
                        quantity: 0,
                    });
                    category_totals.len() - 1
                });
            category_totals[idx].quantity += u64::from(product.quantity);

            if most_expensive.map_or(true, |p| product.price > p.price) {
                most_expensive = Some(product);
            }
            if cheapest.map_or(true, |p| product.price < p.price) {
                cheapest = Some(product);
            }
            if largest_stock.map_or(true, |p| product.quantity > p.quantity) {
                largest_stock = Some(product);
            }
        }

        let top_category = category_totals
            .into_iter()
            .fold(None, |best: Option<CategoryTotal>, candidate| match best {
                Some(b) if b.quantity >= candidate.quantity => Some(b),
                _ => Some(candidate),
            });

        ReportSummary {
            total_products: self.products.len(),
            total_quantity,
            total_value,
            low_stock_threshold: threshold,
            low_stock,
            top_category,
            most_expensive: most_expensive.cloned(),
            cheapest: cheapest.cloned(),
            largest_stock: largest_stock.cloned(),
            last_updated: self.last_updated,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(items: &[(&str, i64, u32, &str)]) -> ProductStore {
        let mut store = ProductStore::new();
        for (name, cents, qty, category) in items {
            store
                .add(name, Money::from_cents(*cents), *qty, category)
                .unwrap();
        }
        store.mark_clean();
        store
    }

    fn names(store: &ProductStore) -> Vec<&str> {
        store.products().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_list_filters_by_category_in_store_order() {
        let store = store_of(&[
            ("Mouse", 100, 1, "Periféricos"),
            ("Café", 100, 1, "Mercearia"),
            ("Teclado", 100, 1, "PERIFÉRICOS"),
        ]);

        let filtered: Vec<_> = store.list(Some("periféricos")).map(|p| p.id).collect();
        assert_eq!(filtered, [1, 3]);
        assert_eq!(store.list(Some("  ")).count(), 3);
        assert_eq!(store.list(Some("Bebidas")).count(), 0);
    }

    #[test]
    fn test_distinct_categories() {
        let store = store_of(&[
            ("Mouse", 100, 1, "Periféricos"),
            ("Café", 100, 1, "mercearia"),
            ("Teclado", 100, 1, "PERIFÉRICOS"),
            ("Açúcar", 100, 1, "Mercearia"),
        ]);
        assert_eq!(store.distinct_categories(), ["mercearia", "Periféricos"]);
    }

    #[test]
    fn test_sort_is_stable_by_quantity() {
        // Same key as B, inserted after it: must stay after it.
        let mut store = store_of(&[("B", 100, 10, "x"), ("A", 100, 10, "y"), ("C", 100, 5, "z")]);

        store.sort(SortKey::Quantity, true);
        assert_eq!(names(&store), ["C", "B", "A"]);
        assert!(store.is_dirty());

        store.sort(SortKey::Quantity, false);
        assert_eq!(names(&store), ["B", "A", "C"]);
    }

    #[test]
    fn test_sort_strings_ignore_case() {
        let mut store = store_of(&[
            ("banana", 300, 1, "Frutas"),
            ("Abacaxi", 500, 1, "frutas"),
            ("cereja", 100, 1, "Doces"),
        ]);

        store.sort(SortKey::Name, true);
        assert_eq!(names(&store), ["Abacaxi", "banana", "cereja"]);

        store.sort(SortKey::Price, false);
        assert_eq!(names(&store), ["Abacaxi", "banana", "cereja"]);

        store.sort(SortKey::Category, true);
        assert_eq!(names(&store), ["cereja", "Abacaxi", "banana"]);
    }

    #[test]
    fn test_sort_does_not_touch_last_updated() {
        let mut store = store_of(&[("B", 100, 1, "x"), ("A", 100, 2, "x")]);
        let stamp = store.last_updated();
        store.sort(SortKey::Name, true);
        assert_eq!(store.last_updated(), stamp);
    }

    #[test]
    fn test_report_low_stock_and_totals() {
        let store = store_of(&[
            ("P1", 199, 5, "A"),
            ("P2", 1050, 15, "B"),
            ("P3", 333, 9, "A"),
            ("P4", 1, 20, "C"),
        ]);
        let report = store.report();

        assert_eq!(report.total_products, 4);
        assert_eq!(report.total_quantity, 49);
        // 199*5 + 1050*15 + 333*9 + 1*20
        assert_eq!(report.total_value.cents(), 995 + 15750 + 2997 + 20);
        assert_eq!(report.low_stock_count(), 2);
        let low: Vec<_> = report.low_stock.iter().map(|p| p.quantity).collect();
        assert_eq!(low, [5, 9]);
        assert_eq!(report.low_stock_threshold, LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn test_report_top_category_tie_goes_to_first_seen() {
        let store = store_of(&[
            ("P1", 100, 7, "Bebidas"),
            ("P2", 100, 10, "Limpeza"),
            ("P3", 100, 3, "bebidas"),
        ]);
        let top = store.report().top_category.unwrap();
        assert_eq!(top.category, "Bebidas");
        assert_eq!(top.quantity, 10);
    }

    #[test]
    fn test_report_highlights() {
        let store = store_of(&[
            ("P1", 500, 3, "A"),
            ("P2", 900, 8, "A"),
            ("P3", 100, 8, "A"),
            ("P4", 900, 1, "A"),
        ]);
        let report = store.report_with_threshold(4);

        assert_eq!(report.most_expensive.as_ref().unwrap().name, "P2");
        assert_eq!(report.cheapest.as_ref().unwrap().name, "P3");
        assert_eq!(report.largest_stock.as_ref().unwrap().name, "P2");
        assert_eq!(report.low_stock_count(), 2);
    }

    #[test]
    fn test_report_on_empty_store() {
        let report = ProductStore::new().report();
        assert!(report.is_empty());
        assert_eq!(report.total_value, Money::zero());
        assert!(report.top_category.is_none());
        assert!(report.most_expensive.is_none());
    }
}
