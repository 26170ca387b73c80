//! # Error Types
//!
//! Domain error types for boleta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boleta-core errors (this file)                                         │
//! │  ├── CoreError        - Form and checkout failures                      │
//! │  └── ValidationError  - Field-level input failures                      │
//! │                                                                         │
//! │  boleta-client errors (separate crate)                                  │
//! │  └── ClientError      - Transport and HTTP status failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → CLI (anyhow)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The totals calculator itself never fails and has no error type.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain failures raised by the receipt form and checkout preconditions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item index did not point into the cart.
    #[error("Item {index} does not exist (cart has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// Checkout attempted with no items.
    ///
    /// ## User Workflow
    /// ```text
    /// Generate boleta
    ///      │
    ///      ▼
    /// items.is_empty()?
    ///      │
    ///      ▼
    /// EmptyCart → "Add at least one product"
    /// ```
    #[error("Add at least one product")]
    EmptyCart,

    /// A cart line failed its quantity, price or discount check.
    /// `line` counts from 1, as printed on the receipt.
    #[error("Line {line}: {source}")]
    InvalidLine {
        line: usize,
        source: ValidationError,
    },

    /// Checkout attempted with a total of zero or less.
    #[error("Total must be greater than zero (got {total})")]
    NonPositiveTotal { total: String },

    /// A backend timestamp did not match any known shape.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a DNI with letters, a malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
