//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories                                         │
//! │                                                                         │
//! │  Caller / PriceCalculator                                              │
//! │       │                                                                 │
//! │       │  db.products().get_by_id(id)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                  CategoryRepository                 │
//! │  ├── list / list_by_category        ├── list                           │
//! │  ├── get_by_id (ProductLookup)      ├── get_by_id                      │
//! │  ├── insert / update / delete       ├── insert / rename / delete       │
//! │  └── count                          └── exists                         │
//! │       │                                  │                              │
//! │       └──────────────┬───────────────────┘                              │
//! │                      ▼                                                  │
//! │               SQLite Database                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, price lookup
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD

use uuid::Uuid;

pub mod category;
pub mod product;

/// Generates a new entity ID (UUID v4).
///
/// ## Usage
/// ```rust
/// use catalog_db::repository::generate_id;
///
/// let id = generate_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
