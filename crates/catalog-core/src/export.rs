//! CSV export of the products of one category.
//!
//! ```text
//! ID,Name,Price,Category
//! 5f0c..,Laptop,1200.00,Electronics
//! 9a1e..,"Cable, 2m",9.90,Electronics
//! ```

use crate::types::{Category, Product};

/// Header row of every export.
pub const CSV_HEADER: &str = "ID,Name,Price,Category";

/// Renders the products that belong to `category` as CSV.
///
/// Products from other categories are skipped; an empty category yields only
/// the header. Prices are printed with exactly two decimals. A price that is
/// not a finite number is written as an empty field.
pub fn export_category_csv(category: &Category, products: &[Product]) -> String {
    let mut out = String::with_capacity(64 * (products.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for product in products.iter().filter(|p| p.in_category(&category.id)) {
        let price = product
            .base_price()
            .map(|m| m.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{}\n",
            escape(&product.id),
            escape(&product.name),
            price,
            escape(&category.name)
        ));
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category::new("c-el", "Electronics")
    }

    #[test]
    fn test_export_category() {
        let cat = category();
        let products = vec![
            Product::new("p-1", "Laptop", 1200.0).with_category(cat.to_ref()),
            Product::new("p-2", "Novel", 15.0),
            Product::new("p-3", "Mouse", 25.5).with_category(cat.to_ref()),
        ];

        let csv = export_category_csv(&cat, &products);
        assert_eq!(
            csv,
            "ID,Name,Price,Category\n\
             p-1,Laptop,1200.00,Electronics\n\
             p-3,Mouse,25.50,Electronics\n"
        );
    }

    #[test]
    fn test_empty_category_is_header_only() {
        assert_eq!(export_category_csv(&category(), &[]), "ID,Name,Price,Category\n");
    }

    #[test]
    fn test_fields_are_quoted() {
        let cat = Category::new("c-1", "Cables, Adapters");
        let products = vec![
            Product::new("p-1", "HDMI \"Gold\" 2m", 9.9).with_category(cat.to_ref()),
        ];

        let csv = export_category_csv(&cat, &products);
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(line, "p-1,\"HDMI \"\"Gold\"\" 2m\",9.90,\"Cables, Adapters\"");
    }
}
