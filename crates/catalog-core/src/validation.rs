//! # Validation Module
//!
//! Input validation for catalog writes and operator configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Repository write (catalog-db)                                │
//! │  └── THIS MODULE: names, finite prices                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (category name)                                │
//! │  └── Foreign key constraints (product → category)                      │
//! │                                                                         │
//! │  Pricing does NOT go through here: a negative stored price is a        │
//! │  calculation-time error, out-of-range discounts are normalised.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_product_name, validate_price};
//!
//! validate_product_name("Laptop Pro").unwrap();
//! validate_price(1200.0).unwrap();
//! assert!(validate_price(f64::NAN).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
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

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Wireless Mouse").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 100 characters
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("category name", name, MAX_CATEGORY_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stored price.
///
/// ## Rules
/// - Must be a finite number
/// - Negative values are accepted here; the price calculator rejects them
///   when a breakdown is requested
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an operator-configured tax rate.
///
/// ## Rules
/// - Must be between 0 and 1 inclusive (0% to 100%)
///
/// Collaborators may still hand the calculator any rate; this check only
/// guards configuration input.
pub fn validate_tax_rate(rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
