//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockbook_core::SortKey;

#[derive(Debug, Parser)]
#[command(name = "stockbook", version, about = "Inventory ledger backed by a JSON file")]
pub struct Cli {
    /// Inventory file (overrides STOCKBOOK_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new product
    Add(AddArgs),

    /// List products in stored order
    List {
        /// Only this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },

    /// List distinct categories
    Categories,

    /// Show one product by name (case-insensitive)
    Search { name: String },

    /// Change price, quantity or category of a product
    Update(UpdateArgs),

    /// Delete a product
    Remove {
        name: String,

        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },

    /// Stock statistics and low-stock alerts
    Report,

    /// Re-order the inventory
    Sort(SortArgs),

    /// Delete every product
    Clear {
        /// Confirm that everything should be deleted
        #[arg(long)]
        yes: bool,

        /// The confirmation word, typed exactly
        #[arg(long, value_name = "WORD", default_value = "")]
        confirm: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    /// Unit price, comma or dot decimals (e.g. 49,90)
    #[arg(long)]
    pub price: String,

    /// Units in stock
    #[arg(long)]
    pub quantity: String,

    /// Blank uses "Sem categoria"
    #[arg(long, default_value = "")]
    pub category: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub name: String,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct SortArgs {
    /// name, price, quantity or category
    #[arg(value_parser = parse_sort_key)]
    pub key: SortKey,

    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    /// Explicit direction, or `None` for the key's default.
    pub fn direction(&self) -> Option<bool> {
        match (self.asc, self.desc) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|e: stockbook_core::ValidationError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "stockbook", "--file", "loja.json", "add", "--name", "Mouse", "--price", "49,90",
            "--quantity", "5",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("loja.json")));
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.name, "Mouse");
                assert_eq!(args.price, "49,90");
                assert_eq!(args.category, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_sort_direction() {
        let cli = Cli::try_parse_from(["stockbook", "sort", "QUANTITY"]).unwrap();
        match cli.command {
            Command::Sort(args) => {
                assert_eq!(args.key, SortKey::Quantity);
                assert_eq!(args.direction(), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["stockbook", "sort", "price", "--desc"]).unwrap();
        match cli.command {
            Command::Sort(args) => assert_eq!(args.direction(), Some(false)),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["stockbook", "sort", "price", "--asc", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["stockbook", "sort", "weight"]).is_err());
    }
}
