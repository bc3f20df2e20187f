//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Pricing / domain errors                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Taxonomy
//! | Variant                | Kind             |
//! |------------------------|------------------|
//! | `ProductNotFound`      | not found        |
//! | `NegativeBasePrice`    | invalid argument |
//! | `InvalidBasePrice`     | invalid argument |
//! | `Lookup`               | collaborator     |
//! | `ArithmeticOverflow`   | invalid argument |
//!
//! Out-of-range discounts and negative tax rates are NOT errors; the
//! calculator normalises them (see [`crate::pricing`]).

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found by the lookup collaborator.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The stored base price is negative after rounding.
    #[error("Product {product_id} has a negative base price: {price}")]
    NegativeBasePrice { product_id: String, price: Money },

    /// The stored base price cannot be represented as exact money
    /// (NaN, infinite, or beyond the decimal range).
    #[error("Product {product_id} has an unusable base price: {value}")]
    InvalidBasePrice { product_id: String, value: f64 },

    /// A pricing stage overflowed the decimal range.
    #[error("Arithmetic overflow while computing {stage}")]
    ArithmeticOverflow { stage: &'static str },

    /// The product lookup collaborator failed. The source is kept verbatim.
    #[error("Product lookup failed: {0}")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the "requested thing does not exist" family.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::ProductNotFound(_))
    }

    /// True for errors caused by bad input data rather than a missing
    /// product or a failing collaborator.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CoreError::NegativeBasePrice { .. }
                | CoreError::InvalidBasePrice { .. }
                | CoreError::ArithmeticOverflow { .. }
                | CoreError::Validation(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything is written.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Rate is outside the allowed interval.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
