//! # Product Commands
//!
//! Add, look up, change and remove single products.
//!
//! ## Update Flow
//! ```text
//! stockbook update mouse --quantity 30
//!      │
//!      ▼
//! ProductFields { price: None, quantity: Some("30"), category: None }
//!      │  parse every provided field first
//!      ▼
//! ProductUpdate { quantity: Some(30) }  ──► store.update("mouse", ..)
//!      │
//!      ▼
//! "Updated #1 Mouse | R$ 49,90 | 30 un | Periféricos"
//! ```

use tracing::debug;

use super::product_line;
use crate::error::ApiResult;
use crate::state::{InventorySession, ProductFields};

pub fn add_product(
    session: &mut InventorySession,
    name: &str,
    price: &str,
    quantity: &str,
    category: &str,
) -> ApiResult<String> {
    let product = session.add_product(name, price, quantity, category)?;
    Ok(format!("Added {}", product_line(session.config(), &product)))
}

pub fn list_products(session: &InventorySession, category: Option<&str>) -> String {
    let products = session.list_products(category);
    debug!(count = products.len(), ?category, "Listing products");

    if products.is_empty() {
        return match category {
            Some(c) if !c.trim().is_empty() => format!("No products in category '{}'", c.trim()),
            _ => "Inventory is empty".to_string(),
        };
    }

    products
        .iter()
        .map(|p| product_line(session.config(), p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn list_categories(session: &InventorySession) -> String {
    let categories = session.categories();
    if categories.is_empty() {
        return "No categories".to_string();
    }
    categories.join("\n")
}

pub fn search_product(session: &InventorySession, name: &str) -> ApiResult<String> {
    let product = session.search_product(name)?;
    let config = session.config();

    Ok(format!(
        "{}\nRegistered: {}\nStock value: {}",
        product_line(config, &product),
        product.registered_at.format("%Y-%m-%d %H:%M:%S"),
        config.format_currency(product.stock_value())
    ))
}

pub fn update_product(
    session: &mut InventorySession,
    name: &str,
    fields: ProductFields,
) -> ApiResult<String> {
    let product = session.update_product(name, fields)?;
    Ok(format!("Updated {}", product_line(session.config(), &product)))
}

/// Removes a product once `confirmed`; otherwise only shows what would go.
pub fn remove_product(
    session: &mut InventorySession,
    name: &str,
    confirmed: bool,
) -> ApiResult<String> {
    if !confirmed {
        let product = session.search_product(name)?;
        return Ok(format!(
            "Not removed: {}\nPass --yes to confirm",
            product_line(session.config(), &product)
        ));
    }

    let product = session.remove_product(name)?;
    Ok(format!("Removed {}", product_line(session.config(), &product)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use stockbook_core::ProductStore;

    fn session() -> InventorySession {
        let mut session = InventorySession::with_store(ConfigState::default(), ProductStore::new());
        session.add_product("Mouse", "49,90", "5", "Periféricos").unwrap();
        session.add_product("Café", "18.99", "12", "Mercearia").unwrap();
        session
    }

    #[test]
    fn test_add_output() {
        let mut session = session();
        let out = add_product(&mut session, "Teclado", "120", "3", "").unwrap();
        assert_eq!(out, "Added #3 Teclado | R$ 120,00 | 3 un | Sem categoria");
    }

    #[test]
    fn test_list_output() {
        let session = session();
        assert_eq!(
            list_products(&session, None),
            "#1 Mouse | R$ 49,90 | 5 un | Periféricos\n#2 Café | R$ 18,99 | 12 un | Mercearia"
        );
        assert_eq!(
            list_products(&session, Some("Bebidas")),
            "No products in category 'Bebidas'"
        );
    }

    #[test]
    fn test_search_output() {
        let session = session();
        let out = search_product(&session, "café").unwrap();
        assert!(out.starts_with("#2 Café | R$ 18,99 | 12 un | Mercearia\n"));
        assert!(out.ends_with("Stock value: R$ 227,88"));
    }

    #[test]
    fn test_remove_needs_confirmation() {
        let mut session = session();

        let out = remove_product(&mut session, "mouse", false).unwrap();
        assert!(out.starts_with("Not removed"));
        assert_eq!(session.store().len(), 2);

        let out = remove_product(&mut session, "mouse", true).unwrap();
        assert!(out.starts_with("Removed #1 Mouse"));
        assert_eq!(session.store().len(), 1);

        let err = remove_product(&mut session, "mouse", true).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
