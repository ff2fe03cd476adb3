//! Product catalog store for the stockroom inventory library.
//!
//! This crate provides the data layer:
//! - Ownership-scoped product CRUD and stock reporting
//! - Reference checking against dependent tables
//! - The deletion policy engine (safe / soft / force delete)

pub mod error;
pub mod models;
pub mod policy;
pub mod repos;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use policy::DeletionPolicy;
pub use store::{CatalogStore, SqliteStore};

use std::sync::Arc;
use stockroom_core::StoreConfig;

/// Create a catalog store from configuration.
pub async fn from_config(config: &StoreConfig) -> CatalogResult<Arc<dyn CatalogStore>> {
    match config {
        StoreConfig::Sqlite {
            path,
            query_timeout_secs,
        } => {
            let store = SqliteStore::new(path, *query_timeout_secs).await?;
            Ok(Arc::new(store) as Arc<dyn CatalogStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_sqlite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("catalog.db");

        let config = StoreConfig::Sqlite {
            path: db_path.clone(),
            query_timeout_secs: None,
        };

        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
        assert!(db_path.exists());
    }
}
