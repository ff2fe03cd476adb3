//! Deletion-safety value objects.
//!
//! A product can only be hard-deleted when no dependent table holds rows
//! referencing it. These types carry the outcome of that check and of the
//! three deletion strategies back to the caller; none of them is persisted.

use std::fmt;

/// Reason reported when a product is missing or owned by another user.
///
/// Deliberately identical for both cases so callers cannot probe for the
/// existence of other users' products.
pub const NOT_FOUND_REASON: &str = "Product not found or access denied";

/// Tables that may hold rows referencing a product.
///
/// A deployment may omit any of these tables; absence reads as zero
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependentTable {
    OrderDetails,
    CartItems,
    InventoryLogs,
}

impl DependentTable {
    /// All tracked dependent tables, in reporting order.
    pub const ALL: [DependentTable; 3] = [
        DependentTable::OrderDetails,
        DependentTable::CartItems,
        DependentTable::InventoryLogs,
    ];

    /// SQL table name.
    pub fn table_name(self) -> &'static str {
        match self {
            DependentTable::OrderDetails => "order_details",
            DependentTable::CartItems => "cart_items",
            DependentTable::InventoryLogs => "inventory_logs",
        }
    }

    /// Human description used in user-facing messages.
    pub fn description(self) -> &'static str {
        match self {
            DependentTable::OrderDetails => "order records",
            DependentTable::CartItems => "shopping cart items",
            DependentTable::InventoryLogs => "inventory log entries",
        }
    }

    /// Whether a force delete clears this table explicitly. Inventory log
    /// rows follow their product through the schema instead.
    pub fn cascade_on_force_delete(self) -> bool {
        !matches!(self, DependentTable::InventoryLogs)
    }
}

impl fmt::Display for DependentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A dependent table holding at least one row referencing the product under
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingTable {
    pub table: DependentTable,
    pub row_count: i64,
}

impl BlockingTable {
    pub fn table_name(&self) -> &'static str {
        self.table.table_name()
    }

    pub fn description(&self) -> &'static str {
        self.table.description()
    }
}

/// Outcome of a deletion-safety check, computed fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionCheck {
    /// No dependent rows; a hard delete is allowed.
    Deletable,
    /// Dependent rows exist in the listed tables.
    Blocked(Vec<BlockingTable>),
    /// The product is missing or owned by another user.
    NotFound,
    /// The check itself failed; detail is logged, not surfaced.
    CheckFailed,
}

impl DeletionCheck {
    pub fn can_delete(&self) -> bool {
        matches!(self, DeletionCheck::Deletable)
    }

    /// Tables blocking the delete, empty unless `Blocked`.
    pub fn blocking_tables(&self) -> &[BlockingTable] {
        match self {
            DeletionCheck::Blocked(tables) => tables,
            _ => &[],
        }
    }

    /// User-facing reason string; empty when deletable.
    pub fn reason(&self) -> String {
        match self {
            DeletionCheck::Deletable => String::new(),
            DeletionCheck::Blocked(tables) => {
                let parts: Vec<String> = tables
                    .iter()
                    .map(|b| format!("{} {}", b.row_count, b.description()))
                    .collect();
                format!(
                    "Cannot delete product because it has associated records: {}. \
                     Consider using soft delete instead.",
                    parts.join(", ")
                )
            }
            DeletionCheck::NotFound => NOT_FOUND_REASON.to_string(),
            DeletionCheck::CheckFailed => {
                "An error occurred while checking delete safety.".to_string()
            }
        }
    }
}

/// Result of a delete attempt, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
}

impl DeleteOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
