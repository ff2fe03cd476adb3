//! Catalog store test utilities.

use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use stockroom_catalog::{CatalogResult, CatalogStore, SqliteStore};
use tempfile::TempDir;

/// A test catalog store wrapper that cleans up on drop.
#[allow(dead_code)]
pub struct TestCatalog {
    pub store: Arc<dyn CatalogStore>,
    sqlite_store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

/// Install a subscriber once so `RUST_LOG` diagnostics show up in tests.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

impl TestCatalog {
    /// Create a new test catalog store backed by a temp-dir SQLite file.
    pub async fn new() -> CatalogResult<Self> {
        init_tracing();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new(&db_path, None).await?;
        let arc_store = Arc::new(store);

        Ok(Self {
            store: arc_store.clone(),
            sqlite_store: arc_store,
            _temp_dir: temp_dir,
        })
    }

    /// Get a reference to the catalog store.
    pub fn store(&self) -> Arc<dyn CatalogStore> {
        self.store.clone()
    }

    /// Get a reference to the SQLite connection pool for raw queries.
    #[allow(dead_code)]
    pub fn pool(&self) -> &Pool<Sqlite> {
        self.sqlite_store.pool()
    }
}
