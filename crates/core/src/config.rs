//! Configuration types shared across crates.

use crate::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Store backend configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Inventory reporting configuration.
    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl AppConfig {
    /// Load configuration by merging an optional TOML file with
    /// `STOCKROOM_`-prefixed environment variables. Env vars win; nested
    /// fields are addressed with `__` (e.g. `STOCKROOM_INVENTORY__LOW_STOCK_THRESHOLD`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("STOCKROOM_").split("__"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Create a test configuration backed by an in-memory database.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            store: StoreConfig::Sqlite {
                path: PathBuf::from(":memory:"),
                query_timeout_secs: None,
            },
            inventory: InventoryConfig::default(),
        }
    }
}

/// Store backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// SQLite database file.
    Sqlite {
        /// Path to the database file.
        path: PathBuf,
        /// Advisory query timeout in seconds.
        #[serde(default)]
        query_timeout_secs: Option<u64>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("data/stockroom.db"),
            query_timeout_secs: None,
        }
    }
}

/// Inventory reporting configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Products with `quantity <= low_stock_threshold` are reported as low stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_low_stock_threshold() -> i64 {
    crate::DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let config = AppConfig::default();
        assert_eq!(config.inventory.low_stock_threshold, 5);
        let StoreConfig::Sqlite { path, .. } = config.store;
        assert_eq!(path, PathBuf::from("data/stockroom.db"));
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        std::fs::write(
            &path,
            r#"
            [store]
            type = "sqlite"
            path = "/tmp/catalog.db"

            [inventory]
            low_stock_threshold = 10
            "#,
        )
        .unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.inventory.low_stock_threshold, 10);
        let StoreConfig::Sqlite { path, .. } = config.store;
        assert_eq!(path, PathBuf::from("/tmp/catalog.db"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/stockroom.toml"))).unwrap();
        assert_eq!(config.inventory.low_stock_threshold, 5);
    }
}
