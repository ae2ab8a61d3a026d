//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--file`)
//! 2. Environment variables (`STOCKBOOK_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the session is open.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stockbook_core::{Money, CLEAR_CONFIRMATION_WORD, LOW_STOCK_THRESHOLD};
use stockbook_storage::DEFAULT_INVENTORY_FILE;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Path of the inventory JSON file
    pub inventory_file: PathBuf,

    /// Quantities strictly below this are reported as low stock
    pub low_stock_threshold: u32,

    /// Word that must be typed to clear the whole inventory
    pub clear_word: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - File: `estoque.json` in the working directory
    /// - Low stock: below 10 units
    /// - Clear word: `ZERAR`
    /// - Currency: `R$`
    fn default() -> Self {
        ConfigState {
            inventory_file: PathBuf::from(DEFAULT_INVENTORY_FILE),
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            clear_word: CLEAR_CONFIRMATION_WORD.to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKBOOK_FILE`: inventory file path
    /// - `STOCKBOOK_LOW_STOCK_THRESHOLD`: low-stock threshold (e.g., "5")
    /// - `STOCKBOOK_CLEAR_WORD`: clear-all confirmation word
    /// - `STOCKBOOK_CURRENCY_SYMBOL`: display symbol
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("STOCKBOOK_FILE").filter(|p| !p.trim().is_empty()) {
            config.inventory_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup("STOCKBOOK_LOW_STOCK_THRESHOLD") {
            config.low_stock_threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOCKBOOK_LOW_STOCK_THRESHOLD".to_string()))?;
        }

        if let Some(word) = lookup("STOCKBOOK_CLEAR_WORD") {
            let word = word.trim();
            if word.is_empty() {
                return Err(ConfigError::InvalidValue("STOCKBOOK_CLEAR_WORD".to_string()));
            }
            config.clear_word = word.to_string();
        }

        if let Some(symbol) = lookup("STOCKBOOK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Formats an amount the way the ledger shows it: comma decimals and a
    /// space after the symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "R$ 12,34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{} {},{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            amount.units().abs(),
            amount.cents_part()
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
