//! # Price Calculator
//!
//! Orchestrates one price calculation.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_price_details(product_id)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. load product ─────────────► ProductNotFound / Lookup               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. base price = round2(price) ► InvalidBasePrice / NegativeBasePrice  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. resolve discount ──► 4. apply discount (downgrade if invalid)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. resolve tax rate, clamp negative to 0                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  6. tax = round2(price after discount × rate)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  7. final = price after discount + tax                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  8. PriceBreakdown                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator keeps no state between calls. The only suspension point is
//! the product lookup; everything after it is synchronous.

use tracing::{debug, error, info};

use crate::error::{CoreError, CoreResult};
use crate::pricing::breakdown::PriceBreakdown;
use crate::pricing::discount::{apply_discount, CategoryDiscountResolver, DiscountResolver};
use crate::pricing::lookup::ProductLookup;
use crate::pricing::tax::{effective_tax_rate, tax_amount, FlatTaxRateResolver, TaxRateResolver};
use crate::types::Product;

/// Computes price breakdowns from a product source and two resolvers.
///
/// ## Usage
/// ```rust
/// use catalog_core::pricing::{InMemoryCatalog, PriceCalculator};
/// use catalog_core::Product;
///
/// let catalog: InMemoryCatalog = vec![Product::new("p-1", "Lamp", 40.0)].into_iter().collect();
/// let calculator = PriceCalculator::with_defaults(catalog);
///
/// let breakdown = calculator
///     .price_product(&Product::new("p-1", "Lamp", 40.0))
///     .unwrap();
/// assert_eq!(breakdown.final_price.to_string(), "47.60");
/// ```
#[derive(Debug, Clone)]
pub struct PriceCalculator<L, D = CategoryDiscountResolver, T = FlatTaxRateResolver> {
    lookup: L,
    discounts: D,
    taxes: T,
}

impl<L> PriceCalculator<L> {
    /// Calculator with the default category rules and the standard tax rate.
    pub fn with_defaults(lookup: L) -> Self {
        PriceCalculator::new(
            lookup,
            CategoryDiscountResolver::default(),
            FlatTaxRateResolver::default(),
        )
    }
}

impl<L, D, T> PriceCalculator<L, D, T> {
    pub fn new(lookup: L, discounts: D, taxes: T) -> Self {
        PriceCalculator {
            lookup,
            discounts,
            taxes,
        }
    }
}

impl<L, D, T> PriceCalculator<L, D, T>
where
    L: ProductLookup,
    D: DiscountResolver,
    T: TaxRateResolver,
{
    /// Loads a product and computes its itemized price.
    ///
    /// ## Errors
    /// * `ProductNotFound` - the lookup has no such product
    /// * `Lookup` - the lookup itself failed (propagated, not retried)
    /// * `NegativeBasePrice` / `InvalidBasePrice` - unusable stored price
    pub async fn calculate_price_details(&self, product_id: &str) -> CoreResult<PriceBreakdown> {
        info!(product_id = %product_id, "Calculating price details");

        let product = self
            .lookup
            .find_product(product_id)
            .await
            .map_err(|e| CoreError::Lookup(Box::new(e)))?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        debug!(product_id = %product_id, name = %product.name, "Found product");

        self.price_product(&product)
    }
}

impl<L, D, T> PriceCalculator<L, D, T>
where
    D: DiscountResolver,
    T: TaxRateResolver,
{
    /// Computes the itemized price of an already-loaded product
    /// (pipeline stages 2 to 8).
    pub fn price_product(&self, product: &Product) -> CoreResult<PriceBreakdown> {
        let product_id = product.id.as_str();

        let base_price = product
            .base_price()
            .ok_or_else(|| CoreError::InvalidBasePrice {
                product_id: product_id.to_string(),
                value: product.price,
            })?;
        if base_price.is_negative() {
            error!(product_id = %product_id, %base_price, "Product has a negative base price");
            return Err(CoreError::NegativeBasePrice {
                product_id: product_id.to_string(),
                price: base_price,
            });
        }
        debug!(product_id = %product_id, %base_price, "Base price");

        let policy = self.discounts.resolve(product);
        debug!(product_id = %product_id, ?policy, "Resolved discount");
        let discount = apply_discount(base_price, policy)?;

        let resolved_rate = self.taxes.resolve(product);
        debug!(product_id = %product_id, rate = %resolved_rate, "Resolved tax rate");
        let tax_rate_applied = effective_tax_rate(resolved_rate);
        let tax = tax_amount(discount.price_after_discount, tax_rate_applied)?;

        let final_price = discount
            .price_after_discount
            .checked_add(tax)
            .ok_or(CoreError::ArithmeticOverflow { stage: "final price" })?;
        info!(product_id = %product_id, %final_price, "Final calculated price");

        Ok(PriceBreakdown {
            product_id: product_id.to_string(),
            base_price,
            applied_discount: discount.effective_policy,
            discount_amount: discount.discount_amount,
            price_after_discount: discount.price_after_discount,
            tax_rate_applied,
            tax_amount: tax,
            final_price,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::pricing::discount::{apply_discount, DiscountPolicy};
    use crate::pricing::lookup::InMemoryCatalog;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Resolves the same discount for every product.
    struct FixedDiscount(DiscountPolicy);

    impl DiscountResolver for FixedDiscount {
        fn resolve(&self, _product: &Product) -> DiscountPolicy {
            self.0
        }
    }

    /// Resolves the same tax rate for every product.
    struct FixedTax(Decimal);

    impl TaxRateResolver for FixedTax {
        fn resolve(&self, _product: &Product) -> Decimal {
            self.0
        }
    }

    fn calculator(
        price: f64,
        discount: DiscountPolicy,
        tax: Decimal,
    ) -> PriceCalculator<InMemoryCatalog, FixedDiscount, FixedTax> {
        let catalog: InMemoryCatalog = vec![Product::new("p-1", "Item", price)].into_iter().collect();
        PriceCalculator::new(catalog, FixedDiscount(discount), FixedTax(tax))
    }

    #[tokio::test]
    async fn test_percentage_discount_with_tax() {
        let calc = calculator(1000.00, DiscountPolicy::Percentage(dec!(0.10)), dec!(0.19));
        let b = calc.calculate_price_details("p-1").await.unwrap();

        assert_eq!(b.product_id, "p-1");
        assert_eq!(b.base_price.amount(), dec!(1000.00));
        assert_eq!(b.applied_discount, DiscountPolicy::Percentage(dec!(0.10)));
        assert_eq!(b.discount_amount.amount(), dec!(100.00));
        assert_eq!(b.price_after_discount.amount(), dec!(900.00));
        assert_eq!(b.tax_rate_applied, dec!(0.19));
        assert_eq!(b.tax_amount.amount(), dec!(171.00));
        assert_eq!(b.final_price.amount(), dec!(1071.00));
    }

    #[tokio::test]
    async fn test_fixed_discount_with_tax() {
        let calc = calculator(150.00, DiscountPolicy::FixedAmount(dec!(5.00)), dec!(0.19));
        let b = calc.calculate_price_details("p-1").await.unwrap();

        assert_eq!(b.discount_amount.amount(), dec!(5.00));
        assert_eq!(b.price_after_discount.amount(), dec!(145.00));
        assert_eq!(b.tax_amount.amount(), dec!(27.55));
        assert_eq!(b.final_price.amount(), dec!(172.55));
    }

    #[tokio::test]
    async fn test_fixed_discount_clamped() {
        let calc = calculator(3.00, DiscountPolicy::FixedAmount(dec!(5.00)), dec!(0.19));
        let b = calc.calculate_price_details("p-1").await.unwrap();

        assert_eq!(b.applied_discount, DiscountPolicy::FixedAmount(dec!(5.00)));
        assert_eq!(b.discount_amount.amount(), dec!(3.00));
        assert_eq!(b.price_after_discount.amount(), dec!(0.00));
        assert_eq!(b.tax_amount.amount(), dec!(0.00));
        assert_eq!(b.final_price.amount(), dec!(0.00));
    }

    #[tokio::test]
    async fn test_out_of_domain_percentage_reported_as_none() {
        let calc = calculator(100.00, DiscountPolicy::Percentage(dec!(1.5)), dec!(0.19));
        let b = calc.calculate_price_details("p-1").await.unwrap();

        assert_eq!(b.applied_discount, DiscountPolicy::None);
        assert_eq!(b.discount_amount.amount(), dec!(0.00));
        assert_eq!(b.price_after_discount.amount(), dec!(100.00));
        assert_eq!(b.final_price.amount(), dec!(119.00));
    }

    #[tokio::test]
    async fn test_negative_tax_rate_clamped() {
        let calc = calculator(100.00, DiscountPolicy::None, dec!(-0.05));
        let b = calc.calculate_price_details("p-1").await.unwrap();

        assert_eq!(b.tax_rate_applied, Decimal::ZERO);
        assert_eq!(b.tax_amount.amount(), dec!(0.00));
        assert_eq!(b.final_price, b.price_after_discount);
    }

    #[tokio::test]
    async fn test_negative_base_price_rejected() {
        let calc = calculator(-10.00, DiscountPolicy::Percentage(dec!(0.10)), dec!(0.19));
        let err = calc.calculate_price_details("p-1").await.unwrap_err();

        assert!(err.is_invalid_argument());
        match err {
            CoreError::NegativeBasePrice { product_id, price } => {
                assert_eq!(product_id, "p-1");
                assert_eq!(price.amount(), dec!(-10.00));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tiny_negative_price_rounds_to_zero() {
        // -0.004 rounds to 0.00, which is not negative
        let calc = calculator(-0.004, DiscountPolicy::None, dec!(0.19));
        let b = calc.calculate_price_details("p-1").await.unwrap();
        assert!(b.base_price.is_zero());
        assert!(b.final_price.is_zero());
    }

    #[tokio::test]
    async fn test_nan_base_price_rejected() {
        let calc = calculator(f64::NAN, DiscountPolicy::None, dec!(0.19));
        let err = calc.calculate_price_details("p-1").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidBasePrice { .. }));
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let calc = calculator(10.0, DiscountPolicy::None, dec!(0.19));
        let err = calc.calculate_price_details("nope").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product not found: nope");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("store unavailable")]
    struct StoreDown;

    struct FailingLookup;

    #[async_trait]
    impl ProductLookup for FailingLookup {
        type Error = StoreDown;

        async fn find_product(&self, _id: &str) -> Result<Option<Product>, StoreDown> {
            Err(StoreDown)
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_propagated_verbatim() {
        let calc = PriceCalculator::with_defaults(FailingLookup);
        let err = calc.calculate_price_details("p-1").await.unwrap_err();

        match err {
            CoreError::Lookup(source) => {
                assert!(source.downcast_ref::<StoreDown>().is_some());
                assert_eq!(source.to_string(), "store unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_default_resolvers() {
        use crate::types::CategoryRef;

        let calc = PriceCalculator::with_defaults(InMemoryCatalog::new());
        let laptop = Product::new("p-9", "Laptop Pro", 1200.0).with_category(CategoryRef {
            id: "c-1".to_string(),
            name: "Electronics".to_string(),
        });

        let b = calc.price_product(&laptop).unwrap();
        assert_eq!(b.applied_discount, DiscountPolicy::Percentage(dec!(0.10)));
        assert_eq!(b.discount_amount.amount(), dec!(120.00));
        assert_eq!(b.price_after_discount.amount(), dec!(1080.00));
        assert_eq!(b.tax_amount.amount(), dec!(205.20));
        assert_eq!(b.final_price.amount(), dec!(1285.20));
    }

    #[test]
    fn test_calculator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PriceCalculator<InMemoryCatalog>>();
    }

    #[test]
    fn test_final_price_overflow_is_an_error() {
        // Both amounts fit on their own, their sum does not
        let calc = calculator(5e26, DiscountPolicy::None, dec!(0.99));
        let err = calc
            .price_product(&Product::new("p-1", "Yacht", 5e26))
            .unwrap_err();

        assert!(matches!(err, CoreError::ArithmeticOverflow { stage: "final price" }));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_price_too_large_for_cents_is_invalid() {
        let calc = calculator(1e27, DiscountPolicy::None, dec!(0.19));
        let err = calc
            .price_product(&Product::new("p-1", "Island", 1e27))
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidBasePrice { .. }));
    }

    #[test]
    fn test_zero_price() {
        let calc = calculator(0.0, DiscountPolicy::FixedAmount(dec!(1)), dec!(0.19));
        let b = calc.price_product(&Product::new("p-0", "Free", 0.0)).unwrap();
        assert_eq!(b.discount_amount, Money::zero());
        assert!(b.final_price.is_zero());
    }

    // -------------------------------------------------------------------------
    // Breakdown invariants
    // -------------------------------------------------------------------------

    fn policy_strategy() -> impl Strategy<Value = DiscountPolicy> {
        prop_oneof![
            Just(DiscountPolicy::None),
            (-50i64..=150).prop_map(|r| DiscountPolicy::Percentage(Decimal::new(r, 2))),
            (-1_000i64..=500_000).prop_map(|c| DiscountPolicy::FixedAmount(Decimal::new(c, 3))),
        ]
    }

    proptest! {
        #[test]
        fn prop_breakdown_invariants(
            cents in 0i64..100_000_000,
            policy in policy_strategy(),
            rate in -20i64..=50,
        ) {
            let price = cents as f64 / 100.0;
            let rate = Decimal::new(rate, 2);
            let calc = PriceCalculator::new(
                InMemoryCatalog::new(),
                FixedDiscount(policy),
                FixedTax(rate),
            );

            let b = calc.price_product(&Product::new("p", "P", price)).unwrap();

            prop_assert_eq!(b.base_price, Money::from_cents(cents));
            prop_assert_eq!(b.discount_amount + b.price_after_discount, b.base_price);
            prop_assert!(!b.price_after_discount.is_negative());
            prop_assert!(b.price_after_discount <= b.base_price);
            prop_assert!(b.tax_rate_applied >= Decimal::ZERO);
            prop_assert_eq!(
                b.tax_amount,
                Money::round2(b.price_after_discount.amount() * b.tax_rate_applied)
            );
            prop_assert_eq!(b.final_price, b.price_after_discount + b.tax_amount);
            for amount in [b.base_price, b.discount_amount, b.price_after_discount, b.tax_amount, b.final_price] {
                prop_assert_eq!(amount.amount().scale(), 2);
            }
        }

        #[test]
        fn prop_oversized_fixed_discount_clamps(cents in 0i64..1_000_000, extra in 1i64..1_000_000) {
            let base = Money::from_cents(cents);
            let outcome = apply_discount(
                base,
                DiscountPolicy::FixedAmount(Decimal::new(cents + extra, 2)),
            )
            .unwrap();
            prop_assert_eq!(outcome.discount_amount, base);
            prop_assert!(outcome.price_after_discount.is_zero());
        }

        #[test]
        fn prop_out_of_domain_percentage_equals_none(
            cents in 0i64..1_000_000,
            rate in prop_oneof![Just(0i64), 101i64..10_000, -10_000i64..0],
        ) {
            let base = Money::from_cents(cents);
            let rejected = apply_discount(base, DiscountPolicy::Percentage(Decimal::new(rate, 2))).unwrap();
            let none = apply_discount(base, DiscountPolicy::None).unwrap();
            prop_assert_eq!(rejected, none);
        }

        #[test]
        fn prop_negative_tax_rate_yields_no_tax(cents in 0i64..1_000_000, rate in -10_000i64..0) {
            let calc = calculator(cents as f64 / 100.0, DiscountPolicy::None, Decimal::new(rate, 4));
            let b = calc.price_product(&Product::new("p", "P", cents as f64 / 100.0)).unwrap();
            prop_assert_eq!(b.tax_rate_applied, Decimal::ZERO);
            prop_assert!(b.tax_amount.is_zero());
            prop_assert_eq!(b.final_price, b.price_after_discount);
        }

        #[test]
        fn prop_negative_price_always_rejected(cents in -100_000_000i64..=-1) {
            let calc = PriceCalculator::with_defaults(InMemoryCatalog::new());
            let product = Product::new("p", "P", cents as f64 / 100.0);
            let err = calc.price_product(&product).unwrap_err();
            prop_assert!(
                matches!(err, CoreError::NegativeBasePrice { .. }),
                "unexpected error: {:?}",
                err
            );
        }
    }
}
