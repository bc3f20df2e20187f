//! # Tax Rates
//!
//! Where the rate comes from ([`TaxRateResolver`]) and how it is applied to
//! the price after discount.
//!
//! A resolver may return any number. Negative rates are clamped to zero
//! here, never reported as errors.

use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// Standard VAT rate used when nothing else is configured (19 %).
pub const STANDARD_TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Supplies the tax rate for a product as a fraction (`0.19` = 19 %).
pub trait TaxRateResolver: Send + Sync {
    fn resolve(&self, product: &Product) -> Decimal;
}

/// Same rate for every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTaxRateResolver {
    rate: Decimal,
}

impl FlatTaxRateResolver {
    pub fn new(rate: Decimal) -> Self {
        FlatTaxRateResolver { rate }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl Default for FlatTaxRateResolver {
    fn default() -> Self {
        FlatTaxRateResolver::new(STANDARD_TAX_RATE)
    }
}

impl TaxRateResolver for FlatTaxRateResolver {
    fn resolve(&self, _product: &Product) -> Decimal {
        self.rate
    }
}

/// Clamps a resolved rate to the rate actually applied (never negative).
pub fn effective_tax_rate(resolved: Decimal) -> Decimal {
    if resolved < Decimal::ZERO {
        error!(rate = %resolved, "Tax resolver returned a negative tax rate, using 0");
        return Decimal::ZERO;
    }
    resolved
}

/// Tax owed on `price_after_discount` at an already-clamped `rate`.
///
/// `round2(price × rate)` for a positive rate, `0.00` otherwise.
///
/// ## Example
/// ```rust
/// use catalog_core::money::Money;
/// use catalog_core::pricing::tax_amount;
/// use rust_decimal::Decimal;
///
/// let tax = tax_amount(Money::from_cents(14500), Decimal::new(19, 2)).unwrap();
/// assert_eq!(tax.to_string(), "27.55");
/// ```
pub fn tax_amount(price_after_discount: Money, rate: Decimal) -> CoreResult<Money> {
    if rate <= Decimal::ZERO {
        debug!("No tax applied (tax rate is 0)");
        return Ok(Money::zero());
    }

    let tax = price_after_discount
        .apply_rate(rate)
        .ok_or(CoreError::ArithmeticOverflow { stage: "tax amount" })?;
    debug!(tax_amount = %tax, "Calculated tax amount");
    Ok(tax)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_rate() {
        assert_eq!(STANDARD_TAX_RATE, dec!(0.19));
        let resolver = FlatTaxRateResolver::default();
        assert_eq!(resolver.resolve(&Product::new("p", "Any", 1.0)), dec!(0.19));
    }

    #[test]
    fn test_effective_rate_clamps_negative() {
        assert_eq!(effective_tax_rate(dec!(-0.05)), Decimal::ZERO);
        assert_eq!(effective_tax_rate(dec!(0)), Decimal::ZERO);
        assert_eq!(effective_tax_rate(dec!(0.07)), dec!(0.07));
    }

    #[test]
    fn test_tax_amount() {
        assert_eq!(
            tax_amount(Money::from_cents(90_000), dec!(0.19)).unwrap().amount(),
            dec!(171.00)
        );
        assert_eq!(
            tax_amount(Money::from_cents(14_500), dec!(0.19)).unwrap().amount(),
            dec!(27.55)
        );
        assert!(tax_amount(Money::from_cents(14_500), dec!(0)).unwrap().is_zero());
        assert!(tax_amount(Money::zero(), dec!(0.19)).unwrap().is_zero());
    }

    #[test]
    fn test_tax_amount_rounds_half_away_from_zero() {
        // 0.50 × 0.25 = 0.125 → 0.13
        assert_eq!(
            tax_amount(Money::from_cents(50), dec!(0.25)).unwrap().amount(),
            dec!(0.13)
        );
    }

    #[test]
    fn test_tax_amount_overflow_is_an_error() {
        let huge = Money::round2(Decimal::MAX / dec!(1000));
        let err = tax_amount(huge, dec!(1000000)).unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow { .. }));
    }
}
