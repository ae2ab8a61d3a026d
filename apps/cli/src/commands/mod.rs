//! # Commands Module
//!
//! One function per subcommand. Each takes the session, runs one operation
//! and returns the text to print on stdout.
//!
//! ## Command Categories
//! - **Product**: add, list, categories, search, update, remove
//! - **Inventory**: report, sort, clear

pub mod inventory;
pub mod product;

use stockbook_core::Product;

use crate::cli::Command;
use crate::error::ApiResult;
use crate::state::{ConfigState, InventorySession, ProductFields};

/// Runs one parsed command against the session.
pub fn dispatch(session: &mut InventorySession, command: Command) -> ApiResult<String> {
    match command {
        Command::Add(args) => product::add_product(
            session,
            &args.name,
            &args.price,
            &args.quantity,
            &args.category,
        ),
        Command::List { category } => Ok(product::list_products(session, category.as_deref())),
        Command::Categories => Ok(product::list_categories(session)),
        Command::Search { name } => product::search_product(session, &name),
        Command::Update(args) => product::update_product(
            session,
            &args.name,
            ProductFields {
                price: args.price,
                quantity: args.quantity,
                category: args.category,
            },
        ),
        Command::Remove { name, yes } => product::remove_product(session, &name, yes),
        Command::Report => Ok(inventory::report(session)),
        Command::Sort(args) => Ok(inventory::sort_products(session, args.key, args.direction())),
        Command::Clear { yes, confirm } => inventory::clear_inventory(session, yes, &confirm),
    }
}

/// One-line product rendering shared by every listing.
pub(crate) fn product_line(config: &ConfigState, product: &Product) -> String {
    format!(
        "#{} {} | {} | {} un | {}",
        product.id,
        product.name,
        config.format_currency(product.price),
        product.quantity,
        product.category
    )
}
