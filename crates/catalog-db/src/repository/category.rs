//! # Category Repository
//!
//! Database operations for categories. Names are unique across the catalog;
//! deleting a category leaves its products uncategorised.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use catalog_core::validation::validate_category_name;
use catalog_core::Category;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;

/// Row shape of the `categories` table.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let books = db.categories().insert("Books").await?;
/// db.categories().rename(&books.id, "Paperbacks").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    /// Gets a category by its exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE name = ?1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    /// Checks whether a category with this ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new category with a generated ID.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored category
    /// * `Err(DbError::Validation)` - Empty or over-long name
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        validate_category_name(name)?;
        let category = Category::new(generate_id(), name.trim());

        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| name_conflict(e, &category.name))?;

        Ok(category)
    }

    /// Renames a category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The updated category
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    pub async fn rename(&self, id: &str, name: &str) -> DbResult<Category> {
        validate_category_name(name)?;
        let name = name.trim();

        debug!(id = %id, name = %name, "Renaming category");

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| name_conflict(e, name))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category. Its products stay, without a category.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

fn name_conflict(err: sqlx::Error, name: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("category name", name),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = db().await;
        let repo = db.categories();

        let books = repo.insert("  Books ").await.unwrap();
        assert_eq!(books.name, "Books");
        assert!(repo.exists(&books.id).await.unwrap());

        let loaded = repo.get_by_id(&books.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, books.id);
        assert_eq!(loaded.name, "Books");

        let by_name = repo.get_by_name("Books").await.unwrap().unwrap();
        assert_eq!(by_name.id, books.id);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
        assert!(!repo.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = db().await;
        let repo = db.categories();
        repo.insert("Toys").await.unwrap();
        repo.insert("Books").await.unwrap();
        repo.insert("Electronics").await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Books", "Electronics", "Toys"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = db().await;
        let repo = db.categories();
        repo.insert("Books").await.unwrap();

        let err = repo.insert("Books").await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "category name");
                assert_eq!(value, "Books");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let db = db().await;
        let err = db.categories().insert("   ").await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let long = "x".repeat(101);
        let err = db.categories().insert(&long).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rename() {
        let db = db().await;
        let repo = db.categories();
        let books = repo.insert("Books").await.unwrap();
        repo.insert("Toys").await.unwrap();

        let renamed = repo.rename(&books.id, "Paperbacks").await.unwrap();
        assert_eq!(renamed.name, "Paperbacks");
        assert!(renamed.updated_at >= books.updated_at);

        let err = repo.rename(&books.id, "Toys").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let err = repo.rename("missing", "Anything").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let repo = db.categories();
        let books = repo.insert("Books").await.unwrap();

        repo.delete(&books.id).await.unwrap();
        assert!(repo.get_by_id(&books.id).await.unwrap().is_none());

        let err = repo.delete(&books.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
