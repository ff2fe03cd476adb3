//! Reference checker trait.

use crate::error::CatalogResult;
use async_trait::async_trait;
use stockroom_core::{BlockingTable, DependentTable};
use uuid::Uuid;

/// Read-only sweep over the tracked dependent tables.
#[async_trait]
pub trait ReferenceRepo: Send + Sync {
    /// Report the dependent tables holding rows that reference the product,
    /// with their row counts. Tables with zero rows are omitted.
    ///
    /// A table absent from this deployment reads as zero references, as does
    /// a table whose count query fails (the failure is logged). Fail-open on
    /// diagnostics, never on authorization.
    async fn check_references(&self, product_id: Uuid) -> CatalogResult<Vec<BlockingTable>>;

    /// Capability probe: whether a dependent table exists in this deployment.
    async fn dependent_table_exists(&self, table: DependentTable) -> CatalogResult<bool>;
}
