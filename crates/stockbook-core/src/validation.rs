//! # Validation Module
//!
//! Numeric input parsing and field validation for Stockbook.
//!
//! ## Input Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Parsing Happens                              │
//! │                                                                         │
//! │  User types "7,99"  (comma decimal separator, pt-BR keyboards)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_price("7,99") ← THIS MODULE                                     │
//! │       │   normalize ',' → '.'                                           │
//! │       │   reject signs, exponents, grouping, garbage                    │
//! │       ▼                                                                 │
//! │  Money(799) ──► ProductStore::add / update                             │
//! │                                                                         │
//! │  The JSON file never sees "7,99": it stores 7.99 as a plain number.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_CATEGORY_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// A non-negative decimal split into its digit runs.
struct DecimalParts<'a> {
    whole: &'a str,
    fraction: &'a str,
}

/// Splits `raw` on a single `.` or `,` separator.
///
/// Accepts `"12"`, `"12.5"`, `"12,5"`, `"12."`, `".5"`. Anything with a sign,
/// exponent, second separator or non-digit character is rejected.
fn split_decimal(raw: &str) -> CoreResult<DecimalParts<'_>> {
    let trimmed = raw.trim();
    let invalid = || CoreError::InvalidNumberFormat {
        input: raw.to_string(),
    };

    let (whole, fraction) = match trimmed.find(['.', ',']) {
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    Ok(DecimalParts { whole, fraction })
}

/// Parses a locale-formatted decimal into cents.
///
/// ## Rules
/// - `,` and `.` are both accepted as the decimal separator
/// - The value must be a valid non-negative number
/// - Digits beyond the second decimal place round half-up to the cent
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::parse_decimal;
///
/// assert_eq!(parse_decimal("7,99").unwrap().cents(), 799);
/// assert_eq!(parse_decimal("7.99").unwrap().cents(), 799);
/// assert_eq!(parse_decimal("10").unwrap().cents(), 1000);
/// assert!(parse_decimal("-1").is_err());
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(raw: &str) -> CoreResult<Money> {
    let parts = split_decimal(raw)?;
    let overflow = || CoreError::InvalidNumberFormat {
        input: raw.to_string(),
    };

    let whole: i64 = if parts.whole.is_empty() {
        0
    } else {
        parts.whole.parse().map_err(|_| overflow())?
    };

    let fraction = parts.fraction.as_bytes();
    let digit = |i: usize| fraction.get(i).map_or(0, |b| i64::from(b - b'0'));
    let mut cents = digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        cents += 1;
    }

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents))
        .map(Money::from_cents)
        .ok_or_else(overflow)
}

/// Parses a unit price. Alias of [`parse_decimal`] named for call sites.
#[inline]
pub fn parse_price(raw: &str) -> CoreResult<Money> {
    parse_decimal(raw)
}

/// Parses a stock quantity.
///
/// ## Rules
/// - Same number syntax as [`parse_decimal`]
/// - A fractional part is only allowed when it is all zeros (`"12,0"`)
/// - Values above `u32::MAX` are rejected as an invalid format
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::parse_quantity;
/// use stockbook_core::CoreError;
///
/// assert_eq!(parse_quantity("12").unwrap(), 12);
/// assert_eq!(parse_quantity("12,0").unwrap(), 12);
/// assert!(matches!(parse_quantity("2,5"), Err(CoreError::InvalidQuantity { .. })));
/// assert!(matches!(parse_quantity("-3"), Err(CoreError::InvalidNumberFormat { .. })));
/// ```
pub fn parse_quantity(raw: &str) -> CoreResult<u32> {
    let parts = split_decimal(raw)?;

    if parts.fraction.bytes().any(|b| b != b'0') {
        return Err(CoreError::InvalidQuantity {
            input: raw.to_string(),
        });
    }
    if parts.whole.is_empty() {
        return Ok(0);
    }

    parts
        .whole
        .parse::<u32>()
        .map_err(|_| CoreError::InvalidNumberFormat {
            input: raw.to_string(),
        })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_label("name", name, MAX_NAME_LEN)
}

/// Validates a category label and returns it trimmed.
///
/// Blank categories are rejected here; [`ProductStore::add`](crate::ProductStore::add)
/// substitutes [`DEFAULT_CATEGORY`](crate::DEFAULT_CATEGORY) before calling this.
pub fn validate_category(category: &str) -> ValidationResult<String> {
    validate_label("category", category, MAX_CATEGORY_LEN)
}

fn validate_label(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a unit price.
///
/// Zero is allowed (free items); negative values are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_accepts_both_separators() {
        assert_eq!(parse_decimal("7,99").unwrap().cents(), 799);
        assert_eq!(parse_decimal("7.99").unwrap().cents(), 799);
        assert_eq!(parse_decimal(" 3,5 ").unwrap().cents(), 350);
        assert_eq!(parse_decimal("12.").unwrap().cents(), 1200);
        assert_eq!(parse_decimal(",5").unwrap().cents(), 50);
        assert_eq!(parse_decimal("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_decimal_rounds_to_cent() {
        assert_eq!(parse_decimal("1,005").unwrap().cents(), 101);
        assert_eq!(parse_decimal("1,004").unwrap().cents(), 100);
        assert_eq!(parse_decimal("0.999").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        for raw in ["", "  ", "abc", "-1", "+1", "1e3", "1.2.3", "1.234,56", "inf", "NaN", ","] {
            assert!(
                matches!(parse_decimal(raw), Err(CoreError::InvalidNumberFormat { .. })),
                "expected rejection for {raw:?}"
            );
        }
        assert!(parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity("15").unwrap(), 15);
        assert_eq!(parse_quantity("15,00").unwrap(), 15);

        assert!(matches!(
            parse_quantity("1,5"),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            parse_quantity("-2"),
            Err(CoreError::InvalidNumberFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("4294967296"),
            Err(CoreError::InvalidNumberFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("dez"),
            Err(CoreError::InvalidNumberFormat { .. })
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Mouse ").unwrap(), "Mouse");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"Ç".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }
}
