//! Validated product input.

use crate::error::{Error, Result};

/// User-supplied fields for creating or editing a product, before they are
/// accepted into the store.
///
/// `unit_price` is in minor currency units (cents).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub description: String,
    pub image_path: Option<String>,
    pub product_code: String,
}

impl ProductDraft {
    /// Validate the draft against the field rules.
    ///
    /// Name, category, and product code must be non-empty after trimming;
    /// unit price must be positive; quantity must be non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidProduct {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidProduct {
                field: "category",
                reason: "must not be empty".to_string(),
            });
        }
        if self.product_code.trim().is_empty() {
            return Err(Error::InvalidProduct {
                field: "product_code",
                reason: "must not be empty".to_string(),
            });
        }
        if self.unit_price <= 0 {
            return Err(Error::InvalidProduct {
                field: "unit_price",
                reason: format!("must be positive, got {}", self.unit_price),
            });
        }
        if self.quantity < 0 {
            return Err(Error::InvalidProduct {
                field: "quantity",
                reason: format!("must not be negative, got {}", self.quantity),
            });
        }
        Ok(())
    }
}
