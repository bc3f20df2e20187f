//! # Product Lookup
//!
//! The read-only product source the calculator loads from.
//!
//! `catalog-db` implements [`ProductLookup`] for its `ProductRepository`;
//! [`InMemoryCatalog`] is the I/O-free implementation for tests and
//! embedding.

use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;

use crate::types::Product;

/// Fetches a product by id.
///
/// `Ok(None)` means "no such product". `Err` is a failure of the source
/// itself (timeout, closed pool, ...) and is propagated by the calculator
/// without retry.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn find_product(&self, id: &str) -> Result<Option<Product>, Self::Error>;
}

/// A fixed set of products held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    /// Adds or replaces a product (keyed by its id).
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

#[async_trait]
impl ProductLookup for InMemoryCatalog {
    type Error = Infallible;

    async fn find_product(&self, id: &str) -> Result<Option<Product>, Infallible> {
        Ok(self.products.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let catalog: InMemoryCatalog = vec![
            Product::new("p-1", "Laptop", 1200.0),
            Product::new("p-2", "Mouse", 25.5),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        let found = catalog.find_product("p-2").await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Mouse".to_string()));
        assert!(catalog.find_product("missing").await.unwrap().is_none());
    }
}
