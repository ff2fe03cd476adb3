//! Deletion policy engine.
//!
//! Central authority for "can this product be removed, and how". Every
//! operation takes an explicit owner id and reports a structured result;
//! store errors never escape to the caller.

use crate::error::CatalogError;
use crate::store::CatalogStore;
use std::sync::Arc;
use stockroom_core::deletion::NOT_FOUND_REASON;
use stockroom_core::{DeleteOutcome, DeletionCheck};
use time::OffsetDateTime;
use uuid::Uuid;

const MSG_DELETED: &str = "Product deleted successfully.";
const MSG_ALREADY_DELETED: &str = "Product not found or already deleted.";
const MSG_RACED_REFERENCES: &str = "Cannot delete product because it has associated records \
     in other tables. Please use soft delete instead.";
const MSG_DELETE_DB_ERROR: &str = "Database error occurred while deleting product.";
const MSG_DEACTIVATED: &str = "Product deactivated successfully.";
const MSG_UPDATE_DB_ERROR: &str = "Database error occurred while updating product.";
const MSG_FORCE_DELETED: &str = "Product and all related records deleted successfully.";

/// Decides, per product, whether a hard delete is safe, and carries out the
/// three deletion strategies.
pub struct DeletionPolicy {
    store: Arc<dyn CatalogStore>,
}

impl DeletionPolicy {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Check whether the product may be hard-deleted.
    ///
    /// Fails closed on ownership: a product that does not exist and a
    /// product owned by someone else yield the same `NotFound`.
    pub async fn evaluate(&self, product_id: Uuid, user_id: Uuid) -> DeletionCheck {
        match self.store.get_product(product_id, user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return DeletionCheck::NotFound,
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "Product lookup failed during delete check"
                );
                return DeletionCheck::CheckFailed;
            }
        }

        match self.store.check_references(product_id).await {
            Ok(blocking) if blocking.is_empty() => DeletionCheck::Deletable,
            Ok(blocking) => DeletionCheck::Blocked(blocking),
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "Reference sweep failed during delete check"
                );
                DeletionCheck::CheckFailed
            }
        }
    }

    /// Hard-delete the product only if the check passes.
    ///
    /// The check and the delete are separate statements, so references can
    /// appear in between; the foreign-key violation catch below is the
    /// correctness backstop for that race, not the check.
    pub async fn safe_delete(&self, product_id: Uuid, user_id: Uuid) -> DeleteOutcome {
        let check = self.evaluate(product_id, user_id).await;
        if !check.can_delete() {
            return DeleteOutcome::failed(check.reason());
        }

        match self.store.delete_product(product_id, user_id).await {
            Ok(0) => DeleteOutcome::failed(MSG_ALREADY_DELETED),
            Ok(_) => DeleteOutcome::ok(MSG_DELETED),
            Err(err) if err.is_reference_violation() => {
                tracing::debug!(
                    product_id = %product_id,
                    "References appeared between check and delete"
                );
                DeleteOutcome::failed(MSG_RACED_REFERENCES)
            }
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "Product delete failed"
                );
                DeleteOutcome::failed(MSG_DELETE_DB_ERROR)
            }
        }
    }

    /// Mark the product inactive, leaving the row and every reference to it
    /// in place. Always allowed; never consults the reference checker.
    pub async fn soft_delete(&self, product_id: Uuid, user_id: Uuid) -> DeleteOutcome {
        let now = OffsetDateTime::now_utc();
        match self.store.deactivate_product(product_id, user_id, now).await {
            Ok(0) => DeleteOutcome::failed(NOT_FOUND_REASON),
            Ok(_) => DeleteOutcome::ok(MSG_DEACTIVATED),
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "Product deactivation failed"
                );
                DeleteOutcome::failed(MSG_UPDATE_DB_ERROR)
            }
        }
    }

    /// Delete the product together with every row referencing it, as one
    /// atomic transaction. Callers must obtain explicit user confirmation
    /// before invoking this.
    pub async fn force_delete(&self, product_id: Uuid, user_id: Uuid) -> DeleteOutcome {
        match self.store.force_delete_product(product_id, user_id).await {
            Ok(stats) => {
                tracing::info!(
                    product_id = %product_id,
                    order_details = stats.order_details,
                    cart_items = stats.cart_items,
                    total = stats.total(),
                    "Product force-deleted with related records"
                );
                DeleteOutcome::ok(MSG_FORCE_DELETED)
            }
            Err(CatalogError::NotFound(_)) => DeleteOutcome::failed(NOT_FOUND_REASON),
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "Force delete failed, transaction rolled back"
                );
                DeleteOutcome::failed(format!("Failed to delete product: {err}"))
            }
        }
    }
}
