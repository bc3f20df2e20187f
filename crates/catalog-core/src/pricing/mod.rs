//! # Pricing
//!
//! Turns a stored product into an itemized [`PriceBreakdown`].
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PriceCalculator<L, D, T>                        │
//! │                                                                         │
//! │   ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐     │
//! │   │ L: ProductLookup │  │ D: Discount-     │  │ T: TaxRate-      │     │
//! │   │  (async, may     │  │    Resolver      │  │    Resolver      │     │
//! │   │   fail)          │  │  (never fails)   │  │  (never fails)   │     │
//! │   └────────┬─────────┘  └────────┬─────────┘  └────────┬─────────┘     │
//! │            │                     │                     │               │
//! │            ▼                     ▼                     ▼               │
//! │        Product ───────► apply_discount ───► effective_tax_rate         │
//! │                                                   tax_amount           │
//! │                                                       │                │
//! │                                                       ▼                │
//! │                                               PriceBreakdown           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stage functions are public so callers can reuse them without a
//! lookup (e.g. pricing a product they already hold).

pub mod breakdown;
pub mod calculator;
pub mod discount;
pub mod lookup;
pub mod tax;

pub use breakdown::PriceBreakdown;
pub use calculator::PriceCalculator;
pub use discount::{
    apply_discount, CategoryDiscountResolver, DiscountOutcome, DiscountPolicy, DiscountResolver,
    DiscountRule,
};
pub use lookup::{InMemoryCatalog, ProductLookup};
pub use tax::{effective_tax_rate, tax_amount, FlatTaxRateResolver, TaxRateResolver, STANDARD_TAX_RATE};
