// ⚠️ Error Types - what the core can report back to its callers
//
// Two kinds only: a submitted receipt was rejected, or a looked-up id is unknown.
// Configuration errors live here too so the binaries share one vocabulary.

use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Reason a submitted receipt was rejected.
///
/// The `Display` text is the message returned to HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid retailer name")]
    Retailer,

    #[error("Invalid purchase date")]
    PurchaseDate,

    #[error("Invalid purchase time")]
    PurchaseTime,

    #[error("Invalid items")]
    Items,

    #[error("Invalid item description")]
    ItemDescription,

    #[error("Invalid item price")]
    ItemPrice,

    #[error("Invalid total")]
    Total,
}

impl ValidationError {
    /// Field on the wire that failed the check
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Retailer => "retailer",
            ValidationError::PurchaseDate => "purchaseDate",
            ValidationError::PurchaseTime => "purchaseTime",
            ValidationError::Items => "items",
            ValidationError::ItemDescription => "shortDescription",
            ValidationError::ItemPrice => "price",
            ValidationError::Total => "total",
        }
    }
}

// ============================================================================
// RECEIPT ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No receipt was ever stored under this id
    #[error("Receipt not found: {0}")]
    NotFound(String),
}

pub type ReceiptResult<T> = Result<T, ReceiptError>;

// ============================================================================
// CONFIG ERROR
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

// ============================================================================
// TESTS
// ============================================================================
