//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  stockbook-storage errors (separate crate)                             │
//! │  └── StorageError     - Missing, malformed or unwritable files         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the command line reports                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is recoverable: the failing operation is rejected and
//! the store is left exactly as it was before the call.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core ledger errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Raw numeric input is not a valid non-negative number.
    ///
    /// ## When This Occurs
    /// - `"abc"`, `"1.2.3"`, `""`
    /// - Negative values such as `"-5"`
    /// - Quantities larger than the supported range
    #[error("Invalid number format: '{input}'")]
    InvalidNumberFormat { input: String },

    /// Quantity input has a non-zero fractional part (e.g. `"2,5"`).
    #[error("Quantity must be a whole number: '{input}'")]
    InvalidQuantity { input: String },

    /// A product with the same name (ignoring case) already exists.
    #[error("Product '{0}' already exists")]
    DuplicateProduct(String),

    /// No product matches the given name (ignoring case).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two products share an id. Only reachable when rebuilding a store from
    /// persisted records; `add` always assigns a fresh id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(u64),

    /// The largest id in the store is `u64::MAX`, so no new id can be assigned.
    #[error("No product ids left to assign")]
    IdsExhausted,

    /// A confirmation step was submitted while the protocol was in another state.
    ///
    /// ## User Workflow
    /// ```text
    /// begin() ──► AwaitingFirstConfirm
    ///      │
    ///      ▼
    /// confirm_word("ZERAR")   ← wrong step
    ///      │
    ///      ▼
    /// ConfirmationOutOfOrder { expected: "AwaitingWordConfirm", actual: "AwaitingFirstConfirm" }
    /// ```
    #[error("Confirmation step out of order: expected {expected}, protocol is {actual}")]
    ConfirmationOutOfOrder {
        expected: &'static str,
        actual: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateProduct("Mouse".to_string());
        assert_eq!(err.to_string(), "Product 'Mouse' already exists");

        let err = CoreError::InvalidNumberFormat {
            input: "-5".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number format: '-5'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: name is required");
    }
}
