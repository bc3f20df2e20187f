//! Catalog configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default            |
//! |------------------------------|--------------------|
//! | `CATALOG_DB_PATH`            | `./catalog_dev.db` |
//! | `CATALOG_DB_MAX_CONNECTIONS` | `5`                |
//! | `CATALOG_STANDARD_TAX_RATE`  | `0.19`             |
//! | `CATALOG_LOG`                | `info`             |

use std::env;
use std::path::PathBuf;

use catalog_core::pricing::FlatTaxRateResolver;
use catalog_core::validation::validate_tax_rate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pool::DbConfig;

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size upper bound
    pub db_max_connections: u32,

    /// Flat tax rate handed to the price calculator, as a fraction
    pub standard_tax_rate: Decimal,

    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = CatalogConfig {
            db_path: PathBuf::from(var("CATALOG_DB_PATH", "./catalog_dev.db")),

            db_max_connections: var("CATALOG_DB_MAX_CONNECTIONS", "5")
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CATALOG_DB_MAX_CONNECTIONS".to_string()))?,

            // Parsed straight to decimal so "0.19" stays exactly 0.19
            standard_tax_rate: var("CATALOG_STANDARD_TAX_RATE", "0.19")
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CATALOG_STANDARD_TAX_RATE".to_string()))?,

            log_filter: var("CATALOG_LOG", "info"),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CATALOG_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        validate_tax_rate(config.standard_tax_rate)
            .map_err(|_| ConfigError::InvalidValue("CATALOG_STANDARD_TAX_RATE".to_string()))?;

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }

    /// Tax resolver applying the configured standard rate.
    pub fn tax_resolver(&self) -> FlatTaxRateResolver {
        FlatTaxRateResolver::new(self.standard_tax_rate)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
