//! Type wrappers for database keys and values
//!
//! Entry and asset trees are keyed by the raw UTF-8 bytes of the asset id so
//! that sled's ordered iteration lists entries by id. Values are bincode
//! encoded.
//!
//! # Types
//!
//! - **`IdKey`**: Wrapper for an asset id used as a database key
//! - **`Revision`**: Big-endian `u64` counter stored in the `meta` tree
//!
//! # Examples
//!
//! ```
//! use addressor::db::types::IdKey;
//!
//! let key = IdKey::new("guid-1");
//! let parsed = IdKey::from_bytes(key.as_bytes()).unwrap();
//! assert_eq!(parsed.as_str(), "guid-1");
//! ```

use super::error::DbError;
use bincode::{Decode, Encode};

/// Wrapper for an asset id that can be used as a database key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdKey(String);

impl IdKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        std::str::from_utf8(bytes)
            .map(|s| Self(s.to_string()))
            .map_err(|e| DbError::SerializeError(format!("Invalid UTF-8 in key: {e}")))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<[u8]> for IdKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Monotonic catalog revision, bumped once per modification event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Revision(pub u64);

impl Revision {
    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the stored value is not 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            DbError::SerializeError(format!("Revision must be 8 bytes, found {}", bytes.len()))
        })?;
        Ok(Self(u64::from_be_bytes(raw)))
    }

    #[must_use]
    pub fn to_bytes(self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Encode a value with the standard bincode configuration
///
/// # Errors
///
/// Returns `DbError::EncodeError` if encoding fails.
pub fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, DbError> {
    Ok(bincode::encode_to_vec(value, bincode::config::standard())?)
}

/// Decode a value with the standard bincode configuration
///
/// # Errors
///
/// Returns `DbError::DecodeError` if the bytes do not hold a `T`.
pub fn decode<T: Decode<()>>(bytes: &[u8]) -> Result<T, DbError> {
    let (value, _): (T, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(value)
}
