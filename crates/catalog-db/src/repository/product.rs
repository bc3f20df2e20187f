//! # Product Repository
//!
//! Database operations for products, and the production
//! [`ProductLookup`] behind the price calculator.
//!
//! ## Loading a Product
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    products LEFT JOIN categories                        │
//! │                                                                         │
//! │  products                          categories                          │
//! │  ┌──────┬────────┬────────┬─────────────┐   ┌──────┬─────────────┐     │
//! │  │ id   │ name   │ price  │ category_id │──►│ id   │ name        │     │
//! │  └──────┴────────┴────────┴─────────────┘   └──────┴─────────────┘     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Product { id, name, price, category: Some(CategoryRef{id, name}) }    │
//! │                                                                         │
//! │  The category name rides along so the discount resolver can match on   │
//! │  it without a second query.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use catalog_core::pricing::ProductLookup;
use catalog_core::validation::{validate_price, validate_product_name};
use catalog_core::{CategoryRef, Product};

use crate::error::{DbError, DbResult};

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.category_id,
        c.name AS category_name,
        p.created_at,
        p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Row shape of `SELECT_PRODUCT`.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
    category_id: Option<String>,
    category_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };

        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_id("uuid-here").await?;
/// let books = repo.list_by_category(&books_id).await?;
///
/// // As the calculator's product source
/// let calculator = PriceCalculator::with_defaults(db.products());
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} ORDER BY p.name, p.id");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists the products of one category ordered by name.
    ///
    /// ## Returns
    /// * `Ok(Vec<Product>)` - Possibly empty
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn list_by_category(&self, category_id: &str) -> DbResult<Vec<Product>> {
        self.ensure_category(category_id).await?;

        let sql = format!("{SELECT_PRODUCT} WHERE p.category_id = ?1 ORDER BY p.name, p.id");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(category_id = %category_id, count = rows.len(), "Listed products by category");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert (id should be generated beforehand
    ///   with [`generate_id`](crate::repository::generate_id))
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product, category name as in the database
    /// * `Err(DbError::Validation)` - Bad name or non-finite price
    /// * `Err(DbError::NotFound)` - Referenced category doesn't exist
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        self.validate(product).await?;

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(product.name.trim())
        .bind(product.price)
        .bind(product.category.as_ref().map(|c| c.id.as_str()))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        self.reload(&product.id).await
    }

    /// Updates name, price and category of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product after the update
    /// * `Err(DbError::NotFound)` - Product or referenced category doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<Product> {
        self.validate(product).await?;

        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                category_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(product.name.trim())
        .bind(product.price)
        .bind(product.category.as_ref().map(|c| c.id.as_str()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        self.reload(&product.id).await
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn validate(&self, product: &Product) -> DbResult<()> {
        validate_product_name(&product.name)?;
        validate_price(product.price)?;

        if let Some(category) = &product.category {
            self.ensure_category(&category.id).await?;
        }

        Ok(())
    }

    async fn ensure_category(&self, category_id: &str) -> DbResult<()> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DbError::not_found("Category", category_id)),
        }
    }

    async fn reload(&self, id: &str) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }
}

#[async_trait]
impl ProductLookup for ProductRepository {
    type Error = DbError;

    async fn find_product(&self, id: &str) -> DbResult<Option<Product>> {
        self.get_by_id(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
