//! # catalog-core: Pure Business Logic for the Product Catalog
//!
//! This crate holds all catalog business logic with zero I/O dependencies.
//! The product lookup is the only async seam, and it is a trait implemented
//! elsewhere.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Callers (seed binary, services)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ statistics│  │   │
//! │  │   │  Product  │  │   Money   │  │ Calculator│  │  export   │  │   │
//! │  │   │ Category  │  │  round2   │  │ Breakdown │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • EXACT DECIMAL MONEY               │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ impl ProductLookup                     │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category)
//! - [`money`] - Exact 2-decimal money, half-away-from-zero rounding
//! - [`pricing`] - Discounts, tax and the price calculator
//! - [`statistics`] - Aggregates over product lists
//! - [`export`] - CSV export per category
//! - [`validation`] - Input checks for catalog writes
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::pricing::{DiscountPolicy, PriceCalculator, InMemoryCatalog};
//! use catalog_core::{Category, Product};
//!
//! let electronics = Category::new("c-1", "Electronics");
//! let laptop = Product::new("p-1", "Laptop", 1000.0).with_category(electronics.to_ref());
//!
//! let calculator = PriceCalculator::with_defaults(InMemoryCatalog::new());
//! let breakdown = calculator.price_product(&laptop).unwrap();
//!
//! assert!(matches!(breakdown.applied_discount, DiscountPolicy::Percentage(_)));
//! assert_eq!(breakdown.final_price.to_string(), "1071.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod money;
pub mod pricing;
pub mod statistics;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use catalog_core::Money` instead of
// `use catalog_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, PriceCalculator};
pub use types::*;
