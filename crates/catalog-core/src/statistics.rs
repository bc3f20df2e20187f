//! # Catalog Statistics
//!
//! Aggregates over an in-memory product list. All functions are pure folds;
//! callers load the products (e.g. `ProductRepository::list`) first.
//!
//! Prices enter through [`Product::base_price`], so every average is an exact
//! decimal mean of already-rounded prices. Products whose stored price is not
//! a finite number are left out of averages and extremes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::Product;

/// Number of products per category name. Uncategorised products are skipped.
pub fn count_per_category(products: &[Product]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for name in products.iter().filter_map(Product::category_name) {
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Mean price over all products, `0.00` for an empty list.
pub fn average_price(products: &[Product]) -> Money {
    mean(products.iter().filter_map(Product::base_price))
}

/// Mean price of the products in one category, `0.00` if it has none.
pub fn average_price_in_category(products: &[Product], category_id: &str) -> Money {
    mean(
        products
            .iter()
            .filter(|p| p.in_category(category_id))
            .filter_map(Product::base_price),
    )
}

/// The most expensive product. Ties go to the earliest in the list.
pub fn most_expensive(products: &[Product]) -> Option<&Product> {
    priced(products.iter()).fold(None, |best: Option<(&Product, Money)>, (p, price)| {
        match best {
            Some((_, top)) if top >= price => best,
            _ => Some((p, price)),
        }
    })
    .map(|(p, _)| p)
}

/// The cheapest product in one category. Ties go to the earliest in the list.
pub fn cheapest_in_category<'a>(products: &'a [Product], category_id: &str) -> Option<&'a Product> {
    priced(products.iter().filter(|p| p.in_category(category_id)))
        .fold(None, |best: Option<(&Product, Money)>, (p, price)| match best {
            Some((_, low)) if low <= price => best,
            _ => Some((p, price)),
        })
        .map(|(p, _)| p)
}

fn priced<'a>(
    products: impl Iterator<Item = &'a Product>,
) -> impl Iterator<Item = (&'a Product, Money)> {
    products.filter_map(|p| p.base_price().map(|price| (p, price)))
}

fn mean(prices: impl Iterator<Item = Money>) -> Money {
    let (sum, count) = prices.fold((Decimal::ZERO, 0u64), |(sum, count), price| {
        (sum.saturating_add(price.amount()), count + 1)
    });
    if count == 0 {
        return Money::zero();
    }
    Money::round2(sum / Decimal::from(count))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryRef;
    use rust_decimal_macros::dec;

    fn electronics() -> CategoryRef {
        CategoryRef {
            id: "c-el".to_string(),
            name: "Electronics".to_string(),
        }
    }

    fn books() -> CategoryRef {
        CategoryRef {
            id: "c-bk".to_string(),
            name: "Books".to_string(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new("p-1", "Laptop", 1200.0).with_category(electronics()),
            Product::new("p-2", "Mouse", 25.5).with_category(electronics()),
            Product::new("p-3", "Novel", 15.0).with_category(books()),
            Product::new("p-4", "Atlas", 150.0).with_category(books()),
            Product::new("p-5", "Gift Card", 50.0),
        ]
    }

    #[test]
    fn test_count_per_category() {
        let counts = count_per_category(&sample());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Electronics"], 2);
        assert_eq!(counts["Books"], 2);
        assert!(count_per_category(&[]).is_empty());
    }

    #[test]
    fn test_average_price() {
        // (1200 + 25.5 + 15 + 150 + 50) / 5 = 288.10
        assert_eq!(average_price(&sample()).amount(), dec!(288.10));
        assert!(average_price(&[]).is_zero());
    }

    #[test]
    fn test_average_price_rounds() {
        let products = vec![
            Product::new("a", "A", 1.0),
            Product::new("b", "B", 1.0),
            Product::new("c", "C", 2.0),
        ];
        // 4 / 3 = 1.333.. → 1.33
        assert_eq!(average_price(&products).amount(), dec!(1.33));
    }

    #[test]
    fn test_average_price_in_category() {
        let products = sample();
        assert_eq!(
            average_price_in_category(&products, "c-el").amount(),
            dec!(612.75)
        );
        assert!(average_price_in_category(&products, "c-none").is_zero());
    }

    #[test]
    fn test_most_expensive() {
        let products = sample();
        assert_eq!(most_expensive(&products).map(|p| p.id.as_str()), Some("p-1"));
        assert!(most_expensive(&[]).is_none());
    }

    #[test]
    fn test_most_expensive_first_of_ties() {
        let products = vec![
            Product::new("a", "A", 9.99),
            Product::new("b", "B", 9.99),
        ];
        assert_eq!(most_expensive(&products).map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn test_cheapest_in_category() {
        let mut products = sample();
        products.push(Product::new("p-6", "Pamphlet", 15.0).with_category(books()));

        assert_eq!(
            cheapest_in_category(&products, "c-bk").map(|p| p.id.as_str()),
            Some("p-3")
        );
        assert!(cheapest_in_category(&products, "c-none").is_none());
    }

    #[test]
    fn test_non_finite_prices_ignored() {
        let products = vec![
            Product::new("a", "A", f64::NAN),
            Product::new("b", "B", 10.0),
        ];
        assert_eq!(average_price(&products).amount(), dec!(10.00));
        assert_eq!(most_expensive(&products).map(|p| p.id.as_str()), Some("b"));
    }
}
