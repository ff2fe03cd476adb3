//! Database models mapping to the catalog schema.

use sqlx::FromRow;
use stockroom_core::ProductDraft;
use time::OffsetDateTime;
use uuid::Uuid;

/// Product record.
///
/// Every query touching this table is scoped by `user_id`; a row is visible
/// to its owner only. `unit_price` is in minor currency units.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub description: String,
    pub image_path: Option<String>,
    /// Business key, unique across all owners.
    pub product_code: String,
    /// False means soft-deleted: excluded from listings and counts but
    /// physically present with all data and references intact.
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ProductRow {
    /// Build a new row from validated draft input, assigning a fresh id.
    pub fn from_draft(user_id: Uuid, draft: &ProductDraft, now: OffsetDateTime) -> Self {
        Self {
            product_id: Uuid::new_v4(),
            user_id,
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            unit_price: draft.unit_price,
            quantity: draft.quantity,
            description: draft.description.clone(),
            image_path: draft.image_path.clone(),
            product_code: draft.product_code.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Optional listing filters. All filters compose with the owner scope and
/// the active-rows-only rule.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Substring match over name and description.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

/// Rows removed from each cascaded table by a force delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeStats {
    pub order_details: u64,
    pub cart_items: u64,
}

impl CascadeStats {
    pub fn total(&self) -> u64 {
        self.order_details + self.cart_items
    }
}
