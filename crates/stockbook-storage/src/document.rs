//! # Inventory Document
//!
//! The on-disk JSON shape. Field names are a compatibility contract with
//! existing `estoque.json` files and must not change:
//!
//! ```json
//! {
//!   "produtos": [
//!     {
//!       "id": 1,
//!       "nome": "Mouse",
//!       "preco": 49.9,
//!       "quantidade": 5,
//!       "categoria": "Periféricos",
//!       "data_cadastro": "2024-05-01T12:34:56.123456Z"
//!     }
//!   ],
//!   "ultima_atualizacao": "2024-05-01T12:40:00Z"
//! }
//! ```
//!
//! Prices are plain JSON numbers. Conversion to integer cents happens here
//! and nowhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{CoreResult, Money, Product, ProductStore};

// =============================================================================
// Document Types
// =============================================================================

/// One product as stored in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "data_cadastro", with = "timestamp")]
    pub registered_at: DateTime<Utc>,
}

/// The whole inventory file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(rename = "produtos")]
    pub products: Vec<ProductRecord>,
    #[serde(rename = "ultima_atualizacao", with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            id: product.id,
            name: product.name.clone(),
            price: product.price.to_decimal(),
            quantity: product.quantity,
            category: product.category.clone(),
            registered_at: product.registered_at,
        }
    }
}

impl ProductRecord {
    /// Converts the record back to a product.
    ///
    /// Returns the reason as text when the price is negative or not a
    /// representable amount. The sign is checked before rounding to cents.
    pub fn into_product(self) -> Result<Product, String> {
        if self.price < 0.0 {
            return Err(format!("product {} has a negative price: {}", self.id, self.price));
        }

        let price = Money::from_decimal(self.price)
            .ok_or_else(|| format!("product {} has an invalid price: {}", self.id, self.price))?;

        Ok(Product {
            id: self.id,
            name: self.name,
            price,
            quantity: self.quantity,
            category: self.category,
            registered_at: self.registered_at,
        })
    }
}

impl InventoryDocument {
    /// Snapshot of a store, in store order.
    pub fn from_store(store: &ProductStore) -> Self {
        InventoryDocument {
            products: store.products().iter().map(ProductRecord::from).collect(),
            last_updated: store.last_updated(),
        }
    }

    /// Rebuilds a clean store. Fails as a whole if any record is invalid.
    pub fn into_store(self) -> Result<ProductStore, String> {
        let products = self
            .products
            .into_iter()
            .map(ProductRecord::into_product)
            .collect::<Result<Vec<_>, _>>()?;

        let store: CoreResult<ProductStore> = ProductStore::from_records(products, self.last_updated);
        store.map_err(|e| e.to_string())
    }
}

// =============================================================================
// Timestamp Format
// =============================================================================

/// RFC 3339 timestamps with full sub-second precision.
///
/// Reading also accepts naive ISO-8601 values without an offset
/// (`2024-05-01T12:34:56.123456`), as written by older tools; those are
/// taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_uses_contract_field_names() {
        let mut store = ProductStore::new();
        store
            .add("Café", Money::from_cents(1899), 3, "Mercearia")
            .unwrap();

        let json = serde_json::to_value(InventoryDocument::from_store(&store)).unwrap();
        let product = &json["produtos"][0];

        assert_eq!(product["id"], 1);
        assert_eq!(product["nome"], "Café");
        assert_eq!(product["preco"], 18.99);
        assert_eq!(product["quantidade"], 3);
        assert_eq!(product["categoria"], "Mercearia");
        assert!(product["data_cadastro"].is_string());
        assert!(json["ultima_atualizacao"].is_string());
    }

    #[test]
    fn test_reads_naive_timestamps() {
        let parsed = timestamp::parse("2024-05-01T12:34:56.123456").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(parsed, expected);

        let offset = timestamp::parse("2024-05-01T09:34:56-03:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap());

        assert!(timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_into_store_rejects_bad_records() {
        let doc: InventoryDocument = serde_json::from_str(
            r#"{
                "produtos": [
                    {"id": 1, "nome": "A", "preco": 1.5, "quantidade": 1, "categoria": "X",
                     "data_cadastro": "2024-01-01T00:00:00"},
                    {"id": 2, "nome": "B", "preco": -2, "quantidade": 1, "categoria": "X",
                     "data_cadastro": "2024-01-01T00:00:00"}
                ],
                "ultima_atualizacao": "2024-01-01T00:00:00"
            }"#,
        )
        .unwrap();

        let reason = doc.into_store().unwrap_err();
        assert!(reason.contains("price"), "{reason}");
    }

    #[test]
    fn test_sub_cent_negative_price_is_rejected() {
        let doc: InventoryDocument = serde_json::from_str(
            r#"{"produtos": [{"id": 1, "nome": "A", "preco": -0.004, "quantidade": 1,
                "categoria": "X", "data_cadastro": "2024-01-01T00:00:00Z"}],
                "ultima_atualizacao": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let reason = doc.into_store().unwrap_err();
        assert!(reason.contains("negative price"), "{reason}");
    }

    #[test]
    fn test_integer_prices_are_accepted() {
        let doc: InventoryDocument = serde_json::from_str(
            r#"{"produtos": [{"id": 7, "nome": "A", "preco": 10, "quantidade": 0,
                "categoria": "X", "data_cadastro": "2024-01-01T00:00:00Z"}],
                "ultima_atualizacao": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let store = doc.into_store().unwrap();
        assert_eq!(store.products()[0].price.cents(), 1000);
        assert_eq!(store.next_id(), Ok(8));
        assert!(!store.is_dirty());
    }
}
