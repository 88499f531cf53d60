//! Addressor - bulk address renaming and label toggling for asset catalogs
//!
//! This library composes new addresses for catalog entries from a small set of
//! naming fragments, toggles labels on them, and applies both across a
//! selection in a single batched catalog update.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod compose;
pub mod config;
pub mod db;
pub mod labels;
pub mod logging;
pub mod output;
pub mod prefs;

#[cfg(test)]
pub mod testing;

use catalog::Entry;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AddressorError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Batch apply error
    #[error("{0}")]
    ApplyError(#[from] batch::ApplyError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// One addressable asset registered in a catalog
///
/// The `id` is stable for the lifetime of the asset; `address` is the
/// human-editable name that bulk renames rewrite.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub asset_path: PathBuf,
    pub address: String,
    pub labels: BTreeSet<String>,
}

impl CatalogEntry {
    /// Create an unlabelled entry whose address is its asset path
    #[must_use]
    pub fn new(id: impl Into<String>, asset_path: impl Into<PathBuf>) -> Self {
        let asset_path = asset_path.into();
        let address = asset_path.to_string_lossy().into_owned();
        Self {
            id: id.into(),
            asset_path,
            address,
            labels: BTreeSet::new(),
        }
    }

    /// Replace the address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Add labels
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

impl Entry for CatalogEntry {
    fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    fn set_address(&mut self, address: String) {
        self.address = address;
    }

    fn set_label(&mut self, label: &str, present: bool) -> bool {
        if present {
            self.labels.insert(label.to_string())
        } else {
            self.labels.remove(label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_uses_asset_path_as_address() {
        let entry = CatalogEntry::new("a1", "Assets/UI/Button.prefab");
        assert_eq!(entry.address, "Assets/UI/Button.prefab");
        assert!(entry.labels.is_empty());
    }

    #[test]
    fn test_set_label_reports_membership_change() {
        let mut entry = CatalogEntry::new("a1", "Assets/Icon.png");
        assert!(entry.set_label("beta", true));
        assert!(!entry.set_label("beta", true));
        assert!(entry.has_label("beta"));
        assert!(entry.set_label("beta", false));
        assert!(!entry.set_label("beta", false));
        assert!(!entry.has_label("beta"));
    }
}
