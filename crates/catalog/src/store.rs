//! Catalog store trait and SQLite implementation.

use crate::error::{CatalogError, CatalogResult};
use crate::repos::{ProductRepo, ReferenceRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined catalog store trait.
#[async_trait]
pub trait CatalogStore: ProductRepo + ReferenceRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> CatalogResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> CatalogResult<()>;
}

/// SQLite-based catalog store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
    #[allow(dead_code)] // Advisory only; SQLite lacks statement cancellation
    query_timeout_secs: u64,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub async fn new(
        path: impl AsRef<Path>,
        query_timeout_secs: Option<u64>,
    ) -> CatalogResult<Self> {
        let path = path.as_ref();
        let query_timeout_secs = query_timeout_secs.unwrap_or(600);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under test concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self {
            pool,
            query_timeout_secs,
        };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn migrate(&self) -> CatalogResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> CatalogResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::{CascadeStats, ProductFilter, ProductRow};
    use stockroom_core::{BlockingTable, DependentTable};
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl ProductRepo for SqliteStore {
        async fn create_product(&self, product: &ProductRow) -> CatalogResult<()> {
            if self
                .get_product_by_code(&product.product_code)
                .await?
                .is_some()
            {
                return Err(CatalogError::AlreadyExists(format!(
                    "product_code '{}' already exists",
                    product.product_code
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO products (
                    product_id, user_id, name, category, unit_price, quantity,
                    description, image_path, product_code, is_active,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(product.product_id)
            .bind(product.user_id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.unit_price)
            .bind(product.quantity)
            .bind(&product.description)
            .bind(&product.image_path)
            .bind(&product.product_code)
            .bind(product.is_active)
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_product(
            &self,
            product_id: Uuid,
            user_id: Uuid,
        ) -> CatalogResult<Option<ProductRow>> {
            let row = sqlx::query_as::<_, ProductRow>(
                "SELECT * FROM products WHERE product_id = ? AND user_id = ?",
            )
            .bind(product_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_product_by_code(
            &self,
            product_code: &str,
        ) -> CatalogResult<Option<ProductRow>> {
            let row =
                sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE product_code = ?")
                    .bind(product_code)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn update_product(&self, product: &ProductRow) -> CatalogResult<()> {
            // product_code and created_at are immutable after creation.
            let result = sqlx::query(
                r#"
                UPDATE products
                SET name = ?, category = ?, unit_price = ?, quantity = ?,
                    description = ?, image_path = ?, is_active = ?, updated_at = ?
                WHERE product_id = ? AND user_id = ?
                "#,
            )
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.unit_price)
            .bind(product.quantity)
            .bind(&product.description)
            .bind(&product.image_path)
            .bind(product.is_active)
            .bind(product.updated_at)
            .bind(product.product_id)
            .bind(product.user_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(CatalogError::NotFound(format!(
                    "product {} not found",
                    product.product_id
                )));
            }
            Ok(())
        }

        async fn list_products(
            &self,
            user_id: Uuid,
            filter: &ProductFilter,
        ) -> CatalogResult<Vec<ProductRow>> {
            let mut sql =
                String::from("SELECT * FROM products WHERE user_id = ? AND is_active = 1");
            if filter.search.is_some() {
                sql.push_str(" AND (name LIKE ? OR description LIKE ?)");
            }
            if filter.category.is_some() {
                sql.push_str(" AND category = ?");
            }
            sql.push_str(" ORDER BY created_at DESC");

            let mut query = sqlx::query_as::<_, ProductRow>(&sql).bind(user_id);
            if let Some(search) = &filter.search {
                let pattern = format!("%{}%", search);
                query = query.bind(pattern.clone()).bind(pattern);
            }
            if let Some(category) = &filter.category {
                query = query.bind(category);
            }

            let rows = query.fetch_all(&self.pool).await?;
            Ok(rows)
        }

        async fn count_products(&self, user_id: Uuid) -> CatalogResult<u64> {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE user_id = ? AND is_active = 1",
            )
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(count as u64)
        }

        async fn count_low_stock(&self, user_id: Uuid, threshold: i64) -> CatalogResult<u64> {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE user_id = ? AND is_active = 1 AND quantity <= ?",
            )
            .bind(user_id)
            .bind(threshold)
            .fetch_one(&self.pool)
            .await?;
            Ok(count as u64)
        }

        async fn list_low_stock(
            &self,
            user_id: Uuid,
            threshold: i64,
        ) -> CatalogResult<Vec<ProductRow>> {
            let rows = sqlx::query_as::<_, ProductRow>(
                "SELECT * FROM products WHERE user_id = ? AND is_active = 1 AND quantity <= ? ORDER BY quantity ASC",
            )
            .bind(user_id)
            .bind(threshold)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_categories(&self, user_id: Uuid) -> CatalogResult<Vec<String>> {
            let rows: Vec<(String,)> = sqlx::query_as(
                "SELECT DISTINCT category FROM products WHERE user_id = ? AND is_active = 1 ORDER BY category",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows.into_iter().map(|(c,)| c).collect())
        }

        async fn delete_product(&self, product_id: Uuid, user_id: Uuid) -> CatalogResult<u64> {
            let result = sqlx::query("DELETE FROM products WHERE product_id = ? AND user_id = ?")
                .bind(product_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }

        async fn deactivate_product(
            &self,
            product_id: Uuid,
            user_id: Uuid,
            deactivated_at: OffsetDateTime,
        ) -> CatalogResult<u64> {
            let result = sqlx::query(
                "UPDATE products SET is_active = 0, updated_at = ? WHERE product_id = ? AND user_id = ?",
            )
            .bind(deactivated_at)
            .bind(product_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
            Ok(result.rows_affected())
        }

        async fn force_delete_product(
            &self,
            product_id: Uuid,
            user_id: Uuid,
        ) -> CatalogResult<CascadeStats> {
            // Single transaction: either the product and every referencing
            // row disappear together, or nothing does.
            let mut tx = self.pool.begin().await?;

            let mut stats = CascadeStats::default();
            for table in DependentTable::ALL {
                if !table.cascade_on_force_delete() {
                    continue;
                }

                let exists: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?)",
                )
                .bind(table.table_name())
                .fetch_one(&mut *tx)
                .await?;

                if !exists {
                    tracing::debug!(
                        table = %table,
                        "Dependent table missing in this deployment, skipping cascade"
                    );
                    continue;
                }

                let removed =
                    sqlx::query(&format!("DELETE FROM {} WHERE product_id = ?", table))
                        .bind(product_id)
                        .execute(&mut *tx)
                        .await?
                        .rows_affected();

                match table {
                    DependentTable::OrderDetails => stats.order_details = removed,
                    DependentTable::CartItems => stats.cart_items = removed,
                    DependentTable::InventoryLogs => {}
                }
            }

            let result = sqlx::query("DELETE FROM products WHERE product_id = ? AND user_id = ?")
                .bind(product_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                // Not found or not owned: undo the cascade deletions too so a
                // partial cascade is never observable.
                tx.rollback().await?;
                return Err(CatalogError::NotFound(format!(
                    "product {} not found",
                    product_id
                )));
            }

            tx.commit().await?;
            Ok(stats)
        }
    }

    #[async_trait]
    impl ReferenceRepo for SqliteStore {
        async fn check_references(&self, product_id: Uuid) -> CatalogResult<Vec<BlockingTable>> {
            let mut blocking = Vec::new();

            for table in DependentTable::ALL {
                match self.dependent_table_exists(table).await {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::debug!(
                            table = %table,
                            "Dependent table missing, treating as zero references"
                        );
                        continue;
                    }
                    Err(err) => {
                        tracing::warn!(
                            table = %table,
                            error = %err,
                            "Dependent table probe failed, treating as zero references"
                        );
                        continue;
                    }
                }

                let count: i64 = match sqlx::query_scalar(&format!(
                    "SELECT COUNT(*) FROM {} WHERE product_id = ?",
                    table
                ))
                .bind(product_id)
                .fetch_one(&self.pool)
                .await
                {
                    Ok(count) => count,
                    Err(err) => {
                        tracing::warn!(
                            table = %table,
                            error = %err,
                            "Reference count failed, treating as zero references"
                        );
                        continue;
                    }
                };

                if count > 0 {
                    blocking.push(BlockingTable {
                        table,
                        row_count: count,
                    });
                }
            }

            Ok(blocking)
        }

        async fn dependent_table_exists(&self, table: DependentTable) -> CatalogResult<bool> {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?)",
            )
            .bind(table.table_name())
            .fetch_one(&self.pool)
            .await?;
            Ok(exists)
        }
    }
}

const SCHEMA_SQL: &str = r#"
-- Products
CREATE TABLE IF NOT EXISTS products (
    product_id BLOB PRIMARY KEY,
    user_id BLOB NOT NULL,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    unit_price INTEGER NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    image_path TEXT,
    product_code TEXT NOT NULL UNIQUE,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_user ON products(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_products_user_category ON products(user_id, category);
CREATE INDEX IF NOT EXISTS idx_products_user_quantity ON products(user_id, quantity);

-- Dependent tables are owned by other parts of the application; they are
-- created here so reference checks and cascade deletes have a schema to run
-- against. A deployment may drop any of them.
--
-- order_details and cart_items reference products restrictively: a hard
-- delete that would orphan them fails at the constraint, which is the
-- backstop behind the check-then-delete flow. inventory_logs rows follow
-- their product.
CREATE TABLE IF NOT EXISTS order_details (
    order_detail_id BLOB PRIMARY KEY,
    order_id BLOB NOT NULL,
    product_id BLOB NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (product_id) REFERENCES products(product_id)
);
CREATE INDEX IF NOT EXISTS idx_order_details_product ON order_details(product_id);

CREATE TABLE IF NOT EXISTS cart_items (
    cart_item_id BLOB PRIMARY KEY,
    user_id BLOB NOT NULL,
    product_id BLOB NOT NULL,
    quantity INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (product_id) REFERENCES products(product_id)
);
CREATE INDEX IF NOT EXISTS idx_cart_items_product ON cart_items(product_id);

CREATE TABLE IF NOT EXISTS inventory_logs (
    log_id BLOB PRIMARY KEY,
    product_id BLOB NOT NULL,
    user_id BLOB NOT NULL,
    quantity_change INTEGER NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (product_id) REFERENCES products(product_id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_inventory_logs_product ON inventory_logs(product_id);
"#;
