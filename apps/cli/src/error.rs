//! # API Error Type
//!
//! Unified error type for session operations and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockbook                              │
//! │                                                                         │
//! │  stockbook add --name Mouse --price 7,9x ...                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function: Result<T, ApiError>                           │  │
//! │  │         │                                                        │  │
//! │  │  Parse Error?   ─── CoreError::InvalidNumberFormat ──┐          │  │
//! │  │  Rule Error?    ─── CoreError::DuplicateProduct ─────┼► ApiError │  │
//! │  │  File Error?    ─── StorageError::MalformedData ─────┘          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stderr: "error [VALIDATION_ERROR]: Invalid number format: '7,9x'"     │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockbook_core::CoreError;
use stockbook_storage::StorageError;

use crate::state::ConfigError;

/// Error returned from session operations and commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product does not exist
    NotFound,

    /// Input validation failed (numbers, names, protocol order)
    ValidationError,

    /// Product name already taken
    Duplicate,

    /// Inventory file missing, malformed or unwritable
    StorageError,

    /// Bad configuration
    ConfigError,

    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(name) => ApiError::not_found("Product", &name),
            CoreError::DuplicateProduct(name) => ApiError::new(
                ErrorCode::Duplicate,
                format!("Product '{}' already exists", name),
            ),
            CoreError::DuplicateId(id) => {
                tracing::error!(id, "Duplicate product id in live store");
                ApiError::internal(format!("Duplicate product id: {}", id))
            }
            CoreError::IdsExhausted => ApiError::internal(CoreError::IdsExhausted.to_string()),
            e @ (CoreError::InvalidNumberFormat { .. }
            | CoreError::InvalidQuantity { .. }
            | CoreError::ConfirmationOutOfOrder { .. }) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts storage errors to API errors.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::Persistence { .. } => {
                tracing::error!(error = %err, "Inventory file I/O failed");
            }
            StorageError::MalformedData { .. } => {
                tracing::warn!(error = %err, "Inventory file rejected");
            }
            StorageError::FileNotFound(_) => {}
        }
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for session operations and commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound("Mouse".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: Mouse");

        let err: ApiError = CoreError::DuplicateProduct("mouse".to_string()).into();
        assert_eq!(err.code, ErrorCode::Duplicate);

        let err: ApiError = CoreError::InvalidQuantity {
            input: "1,5".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = CoreError::IdsExhausted.into();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_storage_error_mapping() {
        let err: ApiError = StorageError::malformed(PathBuf::from("x.json"), "bad").into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.to_string(), "[STORAGE_ERROR] Malformed inventory file x.json: bad");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::validation("nope")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "nope");
    }
}
