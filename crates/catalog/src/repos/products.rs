//! Product repository trait.
//!
//! All operations are scoped by the owning user; an id belonging to another
//! owner behaves exactly like an id that does not exist.

use crate::error::CatalogResult;
use crate::models::{CascadeStats, ProductFilter, ProductRow};
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for product management.
#[async_trait]
pub trait ProductRepo: Send + Sync {
    /// Create a new product. A duplicate product code is `AlreadyExists`.
    async fn create_product(&self, product: &ProductRow) -> CatalogResult<()>;

    /// Get a product by id and owner. Soft-deleted rows are returned too.
    async fn get_product(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<Option<ProductRow>>;

    /// Look up a product by its business key, across all owners.
    async fn get_product_by_code(&self, product_code: &str) -> CatalogResult<Option<ProductRow>>;

    /// Update an existing product, including the image path. `NotFound` if
    /// the row is missing or owned by someone else.
    async fn update_product(&self, product: &ProductRow) -> CatalogResult<()>;

    /// List active products for an owner, newest first.
    async fn list_products(
        &self,
        user_id: Uuid,
        filter: &ProductFilter,
    ) -> CatalogResult<Vec<ProductRow>>;

    /// Count active products for an owner.
    async fn count_products(&self, user_id: Uuid) -> CatalogResult<u64>;

    /// Count active products with `quantity <= threshold`.
    async fn count_low_stock(&self, user_id: Uuid, threshold: i64) -> CatalogResult<u64>;

    /// List active products with `quantity <= threshold`, lowest stock first.
    async fn list_low_stock(&self, user_id: Uuid, threshold: i64) -> CatalogResult<Vec<ProductRow>>;

    /// Distinct categories of an owner's active products, sorted.
    async fn list_categories(&self, user_id: Uuid) -> CatalogResult<Vec<String>>;

    /// Hard-delete a product scoped by owner, returning rows affected.
    /// Foreign-key violations propagate for the caller to classify.
    async fn delete_product(&self, product_id: Uuid, user_id: Uuid) -> CatalogResult<u64>;

    /// Mark a product inactive and refresh its modification timestamp,
    /// scoped by owner. Returns rows affected.
    async fn deactivate_product(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        deactivated_at: OffsetDateTime,
    ) -> CatalogResult<u64>;

    /// Delete a product and all rows referencing it as one atomic
    /// transaction. Dependent tables absent from this deployment are
    /// skipped. `NotFound` (after full rollback) if the product is missing
    /// or owned by someone else.
    async fn force_delete_product(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<CascadeStats>;
}
