//! # Inventory Commands
//!
//! Whole-inventory operations: report, sort and clear.

use stockbook_core::{ClearOutcome, SortKey};

use super::product_line;
use crate::error::ApiResult;
use crate::state::InventorySession;

pub fn report(session: &InventorySession) -> String {
    let summary = session.build_report();
    let config = session.config();

    if summary.is_empty() {
        return "Inventory is empty".to_string();
    }

    let mut lines = vec![
        format!("Products: {}", summary.total_products),
        format!("Units in stock: {}", summary.total_quantity),
        format!("Total value: {}", config.format_currency(summary.total_value)),
    ];

    if let Some(top) = &summary.top_category {
        lines.push(format!("Top category: {} ({} un)", top.category, top.quantity));
    }
    if let Some(p) = &summary.most_expensive {
        lines.push(format!("Most expensive: {} ({})", p.name, config.format_currency(p.price)));
    }
    if let Some(p) = &summary.cheapest {
        lines.push(format!("Cheapest: {} ({})", p.name, config.format_currency(p.price)));
    }
    if let Some(p) = &summary.largest_stock {
        lines.push(format!("Largest stock: {} ({} un)", p.name, p.quantity));
    }

    lines.push(format!(
        "Low stock (below {}): {}",
        summary.low_stock_threshold,
        summary.low_stock_count()
    ));
    lines.extend(summary.low_stock.iter().map(|p| format!("  {}", product_line(config, p))));

    lines.push(format!(
        "Last updated: {}",
        summary.last_updated.format("%Y-%m-%d %H:%M:%S")
    ));

    lines.join("\n")
}

pub fn sort_products(session: &mut InventorySession, key: SortKey, ascending: Option<bool>) -> String {
    let ascending = session.sort_products(key, ascending);
    format!(
        "Sorted by {} ({})",
        key,
        if ascending { "ascending" } else { "descending" }
    )
}

/// Runs the double confirmation. `--yes` is the first answer, `--confirm` the
/// typed word.
pub fn clear_inventory(session: &mut InventorySession, yes: bool, word: &str) -> ApiResult<String> {
    let outcome = session.clear_with_confirmation(yes, word)?;

    Ok(match outcome {
        ClearOutcome::AlreadyEmpty => "Inventory is already empty".to_string(),
        ClearOutcome::Cancelled => format!(
            "Clear cancelled; pass --yes --confirm {} to delete every product",
            session.clear_word()
        ),
        ClearOutcome::Executed { removed } => format!("Removed {} products", removed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use stockbook_core::ProductStore;

    fn session() -> InventorySession {
        let mut session = InventorySession::with_store(ConfigState::default(), ProductStore::new());
        session.add_product("Mouse", "10", "5", "Periféricos").unwrap();
        session.add_product("Teclado", "100", "15", "Periféricos").unwrap();
        session.add_product("Café", "2,5", "9", "Mercearia").unwrap();
        session.add_product("Papel", "1", "20", "Papelaria").unwrap();
        session
    }

    #[test]
    fn test_report_output() {
        let session = session();
        let out = report(&session);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "Products: 4");
        assert_eq!(lines[1], "Units in stock: 49");
        // 10*5 + 100*15 + 2.5*9 + 1*20
        assert_eq!(lines[2], "Total value: R$ 1592,50");
        assert_eq!(lines[3], "Top category: Periféricos (20 un)");
        assert_eq!(lines[4], "Most expensive: Teclado (R$ 100,00)");
        assert_eq!(lines[5], "Cheapest: Papel (R$ 1,00)");
        assert_eq!(lines[6], "Largest stock: Papel (20 un)");
        assert_eq!(lines[7], "Low stock (below 10): 2");
        assert!(lines[8].contains("Mouse"));
        assert!(lines[9].contains("Café"));
        assert!(lines[10].starts_with("Last updated: "));
    }

    #[test]
    fn test_report_empty() {
        let session = InventorySession::with_store(ConfigState::default(), ProductStore::new());
        assert_eq!(report(&session), "Inventory is empty");
    }

    #[test]
    fn test_sort_output() {
        let mut session = session();
        assert_eq!(
            sort_products(&mut session, SortKey::Quantity, None),
            "Sorted by quantity (descending)"
        );
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_clear_output() {
        let mut session = session();

        let out = clear_inventory(&mut session, true, "zerar").unwrap();
        assert!(out.starts_with("Clear cancelled"));
        assert_eq!(session.store().len(), 4);

        let out = clear_inventory(&mut session, true, "ZERAR").unwrap();
        assert_eq!(out, "Removed 4 products");

        let out = clear_inventory(&mut session, false, "").unwrap();
        assert_eq!(out, "Inventory is already empty");
    }
}
