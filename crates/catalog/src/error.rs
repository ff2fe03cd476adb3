//! Catalog store error types.

use thiserror::Error;

/// Catalog store operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Whether this error is a relational reference (foreign key) violation,
    /// raised when a delete would orphan dependent rows.
    pub fn is_reference_violation(&self) -> bool {
        if let CatalogError::Database(sqlx::Error::Database(db_err)) = self {
            return db_err.message().contains("FOREIGN KEY constraint");
        }
        false
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
