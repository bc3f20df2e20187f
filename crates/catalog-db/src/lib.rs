//! # catalog-db: Database Layer for the Product Catalog
//!
//! This crate provides database access for the catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  PriceCalculator::calculate_price_details(id)                          │
//! │       │                                                                 │
//! │       ▼  ProductLookup                                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CategoryRepo  │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   CatalogConfig (env) ──► DbConfig, tax rate                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./catalog_dev.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Database error types
//! - [`repository`] - Product and category repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::PriceCalculator;
//! use catalog_db::{CatalogConfig, Database};
//!
//! let config = CatalogConfig::load()?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let calculator = PriceCalculator::new(
//!     db.products(),
//!     Default::default(),
//!     config.tax_resolver(),
//! );
//! let breakdown = calculator.calculate_price_details(&product_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CatalogConfig, ConfigError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::generate_id;
pub use repository::product::ProductRepository;
