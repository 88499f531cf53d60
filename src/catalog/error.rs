//! Catalog store errors

use thiserror::Error;

use crate::db::DbError;

/// Errors raised by a `CatalogStore` implementation
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Storage backend failure
    #[error("{0}")]
    Db(#[from] DbError),

    /// Id is not an addressable entry
    #[error("'{0}' is not part of the catalog")]
    UnknownEntry(String),
}
