//! Database-specific error types
//!
//! This module defines all error types that can occur during catalog storage
//! operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing data from the database
//! - **`EncodeError`**: Failures when serializing data to the database
//! - **`SerializeError`**: Malformed stored values (e.g., a truncated revision counter)
//! - **`UnknownAsset`** / **`UnknownEntry`**: Lookups for identifiers the catalog does not hold
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use sled::transaction::TransactionError;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// Asset id has never been registered
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// Asset id is not an addressable entry
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    /// Invalid input provided (e.g., an invalid glob pattern)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<TransactionError<Self>> for DbError {
    fn from(err: TransactionError<Self>) -> Self {
        match err {
            TransactionError::Abort(inner) => inner,
            TransactionError::Storage(inner) => Self::SledError(inner),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
