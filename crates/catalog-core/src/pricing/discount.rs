//! # Discount Policies
//!
//! What discount a product gets (the [`DiscountResolver`]) and what that
//! discount does to a base price ([`apply_discount`]).
//!
//! ## Leniency
//! Out-of-domain values are not errors. They are downgraded to
//! [`DiscountPolicy::None`] and the breakdown reports `None`:
//! ```text
//! ┌────────────────────────────┬─────────────────────────────────────────┐
//! │ Policy                     │ Applied as                              │
//! ├────────────────────────────┼─────────────────────────────────────────┤
//! │ Percentage(r), 0 < r ≤ 1   │ round2(base × r)                        │
//! │ Percentage(r), otherwise   │ None                                    │
//! │ FixedAmount(a), round2>0   │ round2(a), clamped to base              │
//! │ FixedAmount(a), otherwise  │ None                                    │
//! │ None                       │ 0.00                                    │
//! └────────────────────────────┴─────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Discount Policy
// =============================================================================

/// One discount decision for a product.
///
/// Serializes adjacently tagged: `{"type":"PERCENTAGE","value":"0.10"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountPolicy {
    /// No discount.
    #[default]
    None,
    /// A fraction of the base price; valid domain `(0, 1]`.
    Percentage(Decimal),
    /// A currency amount; valid when it rounds to more than zero.
    FixedAmount(Decimal),
}

/// Result of applying a policy to a base price.
///
/// Invariant: `discount_amount + price_after_discount == base_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountOutcome {
    /// The policy actually honoured (`None` if the input was downgraded).
    pub effective_policy: DiscountPolicy,
    pub discount_amount: Money,
    pub price_after_discount: Money,
}

impl DiscountOutcome {
    fn none(base_price: Money) -> Self {
        DiscountOutcome {
            effective_policy: DiscountPolicy::None,
            discount_amount: Money::zero(),
            price_after_discount: base_price,
        }
    }
}

/// Applies a discount policy to a non-negative base price.
///
/// Pure: produces a new outcome and never touches the input policy.
///
/// ## Example
/// ```rust
/// use catalog_core::money::Money;
/// use catalog_core::pricing::{apply_discount, DiscountPolicy};
/// use rust_decimal::Decimal;
///
/// let base = Money::from_cents(300); // 3.00
/// let outcome = apply_discount(base, DiscountPolicy::FixedAmount(Decimal::new(5, 0))).unwrap();
/// assert_eq!(outcome.discount_amount, base);      // clamped
/// assert!(outcome.price_after_discount.is_zero());
/// ```
pub fn apply_discount(base_price: Money, policy: DiscountPolicy) -> CoreResult<DiscountOutcome> {
    match policy {
        DiscountPolicy::Percentage(rate) if rate > Decimal::ZERO && rate <= Decimal::ONE => {
            let discount_amount = base_price
                .apply_rate(rate)
                .ok_or(CoreError::ArithmeticOverflow {
                    stage: "percentage discount",
                })?;
            let price_after_discount = base_price - discount_amount;

            debug!(
                %discount_amount,
                %price_after_discount,
                "Applied percentage discount"
            );
            Ok(DiscountOutcome {
                effective_policy: policy,
                discount_amount,
                price_after_discount,
            })
        }
        DiscountPolicy::Percentage(rate) => {
            warn!(%rate, "Invalid percentage discount, ignoring");
            Ok(DiscountOutcome::none(base_price))
        }
        DiscountPolicy::FixedAmount(amount) => {
            let fixed = Money::round2(amount);
            if !fixed.is_positive() {
                warn!(%amount, "Invalid fixed discount, ignoring");
                return Ok(DiscountOutcome::none(base_price));
            }

            let outcome = if fixed > base_price {
                warn!(
                    discount = %fixed,
                    %base_price,
                    "Fixed discount exceeds base price, clamping price after discount to 0"
                );
                DiscountOutcome {
                    effective_policy: policy,
                    discount_amount: base_price,
                    price_after_discount: Money::zero(),
                }
            } else {
                DiscountOutcome {
                    effective_policy: policy,
                    discount_amount: fixed,
                    price_after_discount: base_price - fixed,
                }
            };

            debug!(
                discount_amount = %outcome.discount_amount,
                price_after_discount = %outcome.price_after_discount,
                "Applied fixed discount"
            );
            Ok(outcome)
        }
        DiscountPolicy::None => {
            debug!("No discount applied");
            Ok(DiscountOutcome::none(base_price))
        }
    }
}

// =============================================================================
// Discount Resolver
// =============================================================================

/// Decides which discount a product gets.
///
/// Must never fail: anything it cannot classify gets [`DiscountPolicy::None`].
pub trait DiscountResolver: Send + Sync {
    fn resolve(&self, product: &Product) -> DiscountPolicy;
}

/// One category-based discount rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// Category name, matched case-insensitively.
    pub category: String,
    /// If set, the product's stored price must be strictly greater.
    pub min_base_price: Option<f64>,
    pub policy: DiscountPolicy,
}

impl DiscountRule {
    fn matches(&self, product: &Product) -> bool {
        let Some(category) = product.category_name() else {
            return false;
        };

        category.eq_ignore_ascii_case(&self.category)
            && self.min_base_price.map_or(true, |min| product.price > min)
    }
}

/// Resolves discounts from an ordered list of category rules.
///
/// The first matching rule wins. The default rule set:
/// - "Electronics" → 10 %
/// - "Books" priced above 100 → 5.00 off
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDiscountResolver {
    rules: Vec<DiscountRule>,
}

impl CategoryDiscountResolver {
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        CategoryDiscountResolver { rules }
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }
}

impl Default for CategoryDiscountResolver {
    fn default() -> Self {
        CategoryDiscountResolver::new(vec![
            DiscountRule {
                category: "Electronics".to_string(),
                min_base_price: None,
                policy: DiscountPolicy::Percentage(Decimal::new(10, 2)),
            },
            DiscountRule {
                category: "Books".to_string(),
                min_base_price: Some(100.0),
                policy: DiscountPolicy::FixedAmount(Decimal::new(500, 2)),
            },
        ])
    }
}

impl DiscountResolver for CategoryDiscountResolver {
    fn resolve(&self, product: &Product) -> DiscountPolicy {
        self.rules
            .iter()
            .find(|rule| rule.matches(product))
            .map(|rule| rule.policy)
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
