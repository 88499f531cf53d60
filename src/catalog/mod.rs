//! Catalog store abstraction
//!
//! The batch orchestrator only talks to a catalog through the traits in this
//! module, so the same rename logic runs against the sled-backed
//! [`Database`](crate::db::Database) and the in-memory [`MemoryCatalog`].
//!
//! Mutation goes through `&mut self`: whoever holds the store holds the only
//! writer for the duration of a batch.

mod error;
mod memory;

pub use error::CatalogError;
pub use memory::MemoryCatalog;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::CatalogEntry;

/// Mutable view of one addressable entry
pub trait Entry {
    /// Path of the underlying asset; base and folder names derive from it
    fn asset_path(&self) -> &Path;

    /// Replace the entry's address
    fn set_address(&mut self, address: String);

    /// Mark the entry as having (or not having) a label
    ///
    /// Returns `true` when membership actually changed.
    fn set_label(&mut self, label: &str, present: bool) -> bool;
}

/// Kind of change a catalog reports to its listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModificationKind {
    EntryAdded,
    EntryModified,
    EntryRemoved,
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EntryAdded => "entry added",
            Self::EntryModified => "entry modified",
            Self::EntryRemoved => "entry removed",
        };
        f.write_str(name)
    }
}

/// One change notification
///
/// Every event bumps the catalog revision by exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModificationEvent {
    pub kind: ModificationKind,
    pub ids: Vec<String>,
    pub revision: u64,
}

/// Callback invoked for each modification event
pub type Listener = Box<dyn Fn(&ModificationEvent)>;

/// Storage-side collaborator of the batch orchestrator
pub trait CatalogStore {
    /// Look up an addressable entry by id
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend cannot be read.
    fn find_entry(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// Resolve the asset path of any known asset, addressable or not
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend cannot be read.
    fn resolve_path(&self, id: &str) -> Result<Option<PathBuf>, CatalogError>;

    /// Labels defined for this catalog, in definition order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend cannot be read.
    fn list_label_vocabulary(&self) -> Result<Vec<String>, CatalogError>;

    /// Persist changed entries and notify listeners
    ///
    /// With `batched` set, all entries are committed together and reported
    /// as a single event; otherwise each entry gets its own event.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an entry is not part of the catalog or the
    /// backend cannot be written.
    fn notify_entries_changed(
        &mut self,
        entries: &[CatalogEntry],
        batched: bool,
    ) -> Result<Vec<ModificationEvent>, CatalogError>;
}
