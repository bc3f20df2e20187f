//! # Domain Types
//!
//! Core catalog types used throughout the workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌─────────────────┐                      │
//! │  │    Category     │          │     Product     │                      │
//! │  │  ─────────────  │  1    *  │  ─────────────  │                      │
//! │  │  id (UUID)      │◄─────────│  id (UUID)      │                      │
//! │  │  name (unique)  │          │  name           │                      │
//! │  └─────────────────┘          │  price (f64)    │                      │
//! │                               │  category?      │                      │
//! │                               └─────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why is `price` an f64?
//! The store keeps the price as a plain number. It only becomes [`Money`]
//! through [`Product::base_price`], which is the one conversion point into
//! exact decimal arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category ("Electronics", "Books", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across the catalog.
    pub name: String,

    /// When the category was created.
    pub created_at: DateTime<Utc>,

    /// When the category was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Category {
            id: id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the lightweight reference embedded in products.
    pub fn to_ref(&self) -> CategoryRef {
        CategoryRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// The category fields a product carries with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stored price before discount and tax.
    pub price: f64,

    /// Category the product belongs to, if any.
    pub category: Option<CategoryRef>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an uncategorised product stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        let now = Utc::now();
        Product {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Places the product in a category.
    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns the price as exact money, rounded to 2 places.
    ///
    /// `None` when the stored number is NaN, infinite or out of range.
    #[inline]
    pub fn base_price(&self) -> Option<Money> {
        Money::from_f64(self.price)
    }

    /// Returns the category name, if the product has a category.
    #[inline]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Checks whether the product belongs to the given category id.
    pub fn in_category(&self, category_id: &str) -> bool {
        self.category
            .as_ref()
            .is_some_and(|c| c.id == category_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
