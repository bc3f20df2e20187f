//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    1.005 is stored as 1.00499999999999989...                           │
//! │    round(1.005, 2) = 1.00  ❌ WRONG!                                    │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal, always scale 2                    │
//! │    "1.005" (exact) → round half away from zero → 1.01                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Discipline
//! Every `Money` value is rounded to exactly two fractional digits using
//! round-half-away-from-zero at the moment it is created. Pricing stages
//! round independently, then sum already-rounded values.
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_string(), "15.99");
//!
//! // Half away from zero, not banker's rounding
//! let rounded = Money::round2(Decimal::new(2345, 3)); // 2.345
//! assert_eq!(rounded.to_string(), "2.35");
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Number of fractional digits every monetary value carries.
pub const MONEY_SCALE: u32 = 2;

/// A decimal too large in magnitude to carry two fractional digits
/// (roughly beyond ±7.9 × 10²⁶).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} cannot be represented with two decimal places")]
pub struct MoneyRangeError(pub Decimal);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value with exactly two fractional digits.
///
/// ## Design Decisions
/// - **Decimal, not f64**: no representation error before rounding
/// - **Signed**: a stored price may be negative; the calculator rejects it
/// - **Always scale 2**: `Display` and serde show `"5.00"`, never `"5"`.
///   Deserialisation rounds, so `"1.005"` reads back as `1.01`.
///
/// ## Where Money is Used
/// ```text
/// Product.price (f64) ──► Money::from_f64 ──► base price
///                                               │
///                      discount amount ◄────────┤
///                                               ▼
///                                   price after discount ──► tax amount
///                                               │               │
///                                               └──── + ────────┘
///                                                      │
///                                                 final price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Rounds an exact decimal to a monetary value.
    ///
    /// Ties round away from zero (`2.345 → 2.35`, `-2.345 → -2.35`).
    /// Banker's rounding is deliberately NOT used.
    ///
    /// The value must fit in two fractional digits; anything that may be
    /// larger goes through [`Money::try_round2`].
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::round2(Decimal::new(1125, 3)).to_string(), "1.13");
    /// assert_eq!(Money::round2(Decimal::new(-1125, 3)).to_string(), "-1.13");
    /// ```
    pub fn round2(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        // rescale silently settles for fewer digits when the mantissa is full
        rounded.rescale(MONEY_SCALE);
        // -0.004 rounds to "-0.00"
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Money(rounded)
    }

    /// Like [`Money::round2`], but `None` when the magnitude leaves no room
    /// for two fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Money::try_round2(Decimal::new(1005, 3)).is_some());
    /// assert!(Money::try_round2(Decimal::from_i128_with_scale(10_i128.pow(27), 0)).is_none());
    /// ```
    pub fn try_round2(value: Decimal) -> Option<Self> {
        let money = Money::round2(value);
        (money.0.scale() == MONEY_SCALE).then_some(money)
    }

    /// Converts a loosely-typed stored number into money.
    ///
    /// This is the single cast boundary between `f64` and exact decimal.
    /// The float is first turned into its shortest round-trip decimal
    /// representation (`1.005_f64` becomes exactly `1.005`), then rounded.
    ///
    /// ## Returns
    /// * `Some(Money)` - the rounded value
    /// * `None` - NaN, infinite, or too large to carry two decimals
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(1.005).unwrap().to_string(), "1.01");
    /// assert_eq!(Money::from_f64(999.99).unwrap().to_string(), "999.99");
    /// assert!(Money::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // `Display` for f64 prints the shortest string that round-trips,
        // never in exponent notation.
        let exact = value
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_f64(value))?;

        Money::try_round2(exact)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Returns zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::new(0, MONEY_SCALE))
    }

    /// Returns the underlying exact decimal (always scale 2).
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a rate and rounds the product to money.
    ///
    /// Used for both the percentage discount amount and the tax amount:
    /// `round2(self × rate)`.
    ///
    /// ## Returns
    /// `None` if the multiplication overflows the decimal range.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_cents(14500);        // 145.00
    /// let tax = price.apply_rate(Decimal::new(19, 2)).unwrap(); // × 0.19
    /// assert_eq!(tax.to_string(), "27.55");
    /// ```
    pub fn apply_rate(&self, rate: Decimal) -> Option<Money> {
        self.0.checked_mul(rate).and_then(Money::try_round2)
    }

    /// Adds two values, `None` if the sum no longer fits two decimals.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).and_then(Money::try_round2)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the plain amount with two decimals (`1071.00`).
///
/// Currency symbols are a presentation concern and are not added here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyRangeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::try_round2(value).ok_or(MoneyRangeError(value))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values. Both addends are already scale 2, so the
/// sum is exact and needs no further rounding.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
