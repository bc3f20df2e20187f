//! Itemized result of one price calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::discount::DiscountPolicy;

/// Fully itemized price of one product.
///
/// Built once per calculation and returned by value. Every instance the
/// calculator produces satisfies:
/// - `discount_amount + price_after_discount == base_price`
/// - `0 <= price_after_discount <= base_price`
/// - `tax_amount == round2(price_after_discount × tax_rate_applied)`
/// - `final_price == price_after_discount + tax_amount`
/// - `tax_rate_applied >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub product_id: String,
    pub base_price: Money,
    /// The discount actually honoured; `None` if the resolved one was invalid.
    pub applied_discount: DiscountPolicy,
    pub discount_amount: Money,
    pub price_after_discount: Money,
    /// The clamped rate, not the raw resolver value.
    pub tax_rate_applied: Decimal,
    pub tax_amount: Money,
    pub final_price: Money,
}
