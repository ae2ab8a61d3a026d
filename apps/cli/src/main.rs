//! # Stockbook Entry Point
//!
//! ```text
//! stockbook [--file PATH] <command>
//!
//!   add        register a product
//!   list       list products (optionally one category)
//!   categories list distinct categories
//!   search     show one product by name
//!   update     change price, quantity or category
//!   remove     delete a product (needs --yes)
//!   report     stock statistics and low-stock alerts
//!   sort       re-order the saved inventory
//!   clear      delete everything (needs --yes and the confirmation word)
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    stockbook_cli::run()
}
