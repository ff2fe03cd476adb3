//! Core domain types and shared logic for the stockroom inventory library.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Application configuration and loading
//! - Validated product input
//! - Deletion-safety value objects and result reporting

pub mod config;
pub mod deletion;
pub mod error;
pub mod product;

pub use config::{AppConfig, InventoryConfig, StoreConfig};
pub use deletion::{BlockingTable, DeleteOutcome, DeletionCheck, DependentTable};
pub use error::{Error, Result};
pub use product::ProductDraft;

/// Default low-stock threshold when no configuration is provided.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
