//! Database wrapper module for addressor
//!
//! Provides the sled-backed catalog store.
//!
//! Uses multiple sled trees:
//! - `entries`: asset id -> addressable [`CatalogEntry`]
//! - `assets`: asset id -> asset path, for every known asset
//! - `label_index`: reverse index mapping a label to the ids carrying it
//! - `meta`: label vocabulary and the modification revision
//!
//! Writes that touch entries run as one multi-tree transaction, so a batched
//! change lands atomically together with its index updates and revision bump.

use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionalTree, Transactional,
};
use sled::{Db, Tree};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::CatalogEntry;
use crate::catalog::{CatalogError, CatalogStore, Listener, ModificationEvent, ModificationKind};

pub mod error;
pub mod types;

pub use error::DbError;
use types::{IdKey, Revision, decode, encode};

const VOCABULARY_KEY: &str = "vocabulary";
const REVISION_KEY: &str = "revision";

type TxResult<T> = ConflictableTransactionResult<T, DbError>;

fn abort<E: Into<DbError>>(err: E) -> ConflictableTransactionError<DbError> {
    ConflictableTransactionError::Abort(err.into())
}

/// Sled-backed catalog
pub struct Database {
    db: Db,
    entries: Tree,
    assets: Tree,
    label_index: Tree,
    meta: Tree,
    listeners: Vec<Listener>,
}

impl Database {
    /// Opens or creates a catalog at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use addressor::db::Database;
    /// let db = Database::open("my_catalog").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let entries = db.open_tree("entries")?;
        let assets = db.open_tree("assets")?;
        let label_index = db.open_tree("label_index")?;
        let meta = db.open_tree("meta")?;
        Ok(Self {
            db,
            entries,
            assets,
            label_index,
            meta,
            listeners: Vec::new(),
        })
    }

    /// Register a known asset under `id`
    ///
    /// Registering does not make the asset addressable. Re-registering an id
    /// updates its path, including the path of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or encoding fail.
    pub fn register_asset<P: AsRef<Path>>(&mut self, id: &str, path: P) -> Result<(), DbError> {
        let path = path.as_ref().to_path_buf();
        self.assets.insert(IdKey::new(id), encode(&path)?)?;

        if let Some(mut entry) = self.get_entry(id)?
            && entry.asset_path != path
        {
            entry.asset_path = path;
            self.commit(ModificationKind::EntryModified, &[entry], &[])?;
        }
        Ok(())
    }

    /// List every known asset as `(id, path)`, ordered by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_assets(&self) -> Result<Vec<(String, PathBuf)>, DbError> {
        let mut assets = Vec::new();
        for item in &self.assets {
            let (key, value) = item?;
            let id = IdKey::from_bytes(&key)?.into_inner();
            assets.push((id, decode(&value)?));
        }
        Ok(assets)
    }

    /// Get the path of a known asset
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or decoding fail.
    pub fn asset_path(&self, id: &str) -> Result<Option<PathBuf>, DbError> {
        match self.assets.get(IdKey::new(id))? {
            Some(value) => Ok(Some(decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Mark a known asset as addressable
    ///
    /// When `path` is given the asset is registered first. The address
    /// defaults to the asset path. Adding an id that is already an entry
    /// only updates its address when one is given.
    ///
    /// # Errors
    ///
    /// Returns `DbError::UnknownAsset` if the id is not registered and no path
    /// is given, or `DbError` if database operations fail.
    pub fn add_entry(
        &mut self,
        id: &str,
        path: Option<&Path>,
        address: Option<String>,
    ) -> Result<CatalogEntry, DbError> {
        if let Some(path) = path {
            self.register_asset(id, path)?;
        }

        if let Some(mut existing) = self.get_entry(id)? {
            if let Some(address) = address {
                existing.address = address;
                self.commit(ModificationKind::EntryModified, &[existing.clone()], &[])?;
            }
            return Ok(existing);
        }

        let asset_path = self
            .asset_path(id)?
            .ok_or_else(|| DbError::UnknownAsset(id.to_string()))?;
        let mut entry = CatalogEntry::new(id, asset_path);
        if let Some(address) = address {
            entry.address = address;
        }
        self.commit(ModificationKind::EntryAdded, &[entry.clone()], &[])?;
        Ok(entry)
    }

    /// Remove an entry from the catalog; the asset stays registered
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn remove_entry(&mut self, id: &str) -> Result<bool, DbError> {
        if self.get_entry(id)?.is_none() {
            return Ok(false);
        }
        self.commit(ModificationKind::EntryRemoved, &[], &[id.to_string()])?;
        Ok(true)
    }

    /// Get one entry
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or decoding fail.
    pub fn get_entry(&self, id: &str) -> Result<Option<CatalogEntry>, DbError> {
        match self.entries.get(IdKey::new(id))? {
            Some(value) => Ok(Some(decode(&value)?)),
            None => Ok(None),
        }
    }

    /// List all entries ordered by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_entries(&self) -> Result<Vec<CatalogEntry>, DbError> {
        let mut entries = Vec::new();
        for item in &self.entries {
            let (_, value) = item?;
            entries.push(decode(&value)?);
        }
        Ok(entries)
    }

    /// Ids of the entries carrying `label` (reverse index lookup)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or decoding fail.
    pub fn find_by_label(&self, label: &str) -> Result<Vec<String>, DbError> {
        match self.label_index.get(label.as_bytes())? {
            Some(value) => decode(&value),
            None => Ok(Vec::new()),
        }
    }

    /// Ids of every known asset whose path matches a glob pattern
    ///
    /// Non-addressable assets are included so a selection can report them.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for a malformed pattern, or `DbError`
    /// if iteration fails.
    pub fn find_by_path_glob(&self, pattern: &str) -> Result<Vec<String>, DbError> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| DbError::InvalidInput(format!("Invalid glob pattern '{pattern}': {e}")))?;
        Ok(self
            .list_assets()?
            .into_iter()
            .filter(|(_, path)| pattern.matches_path(path))
            .map(|(id, _)| id)
            .collect())
    }

    /// The label vocabulary, in definition order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or decoding fail.
    pub fn list_labels(&self) -> Result<Vec<String>, DbError> {
        match self.meta.get(VOCABULARY_KEY)? {
            Some(value) => decode(&value),
            None => Ok(Vec::new()),
        }
    }

    /// Define a label; returns `false` if it already exists
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for an empty or blank label, or
    /// `DbError` if database operations fail.
    pub fn add_label(&mut self, label: &str) -> Result<bool, DbError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DbError::InvalidInput("Label cannot be empty".into()));
        }
        let mut labels = self.list_labels()?;
        if labels.iter().any(|l| l == label) {
            return Ok(false);
        }
        labels.push(label.to_string());
        self.meta.insert(VOCABULARY_KEY, encode(&labels)?)?;
        Ok(true)
    }

    /// Delete a label from the vocabulary and from every entry carrying it
    ///
    /// Returns the number of entries that lost the label.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn remove_label(&mut self, label: &str) -> Result<usize, DbError> {
        let mut stripped = Vec::new();
        for id in self.find_by_label(label)? {
            if let Some(mut entry) = self.get_entry(&id)?
                && entry.labels.remove(label)
            {
                stripped.push(entry);
            }
        }
        if !stripped.is_empty() {
            self.commit(ModificationKind::EntryModified, &stripped, &[])?;
        }

        let mut labels = self.list_labels()?;
        labels.retain(|l| l != label);
        self.meta.insert(VOCABULARY_KEY, encode(&labels)?)?;
        Ok(stripped.len())
    }

    /// Current modification revision
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the stored revision is malformed.
    pub fn revision(&self) -> Result<u64, DbError> {
        match self.meta.get(REVISION_KEY)? {
            Some(value) => Ok(Revision::from_bytes(&value)?.0),
            None => Ok(0),
        }
    }

    /// Number of addressable entries
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Register a listener for modification events
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Write and delete entries in one transaction and emit one event
    fn commit(
        &self,
        kind: ModificationKind,
        upserts: &[CatalogEntry],
        removals: &[String],
    ) -> Result<ModificationEvent, DbError> {
        let revision = (&self.entries, &self.label_index, &self.meta).transaction(
            |(entries, index, meta)| {
                for entry in upserts {
                    Self::write_entry(entries, index, entry)?;
                }
                for id in removals {
                    Self::delete_entry(entries, index, id)?;
                }
                let current = match meta.get(REVISION_KEY)? {
                    Some(value) => Revision::from_bytes(&value).map_err(abort)?,
                    None => Revision::default(),
                };
                let next = current.next();
                meta.insert(REVISION_KEY, next.to_bytes())?;
                Ok(next)
            },
        )?;
        self.db.flush()?;

        let ids = upserts
            .iter()
            .map(|e| e.id.clone())
            .chain(removals.iter().cloned())
            .collect();
        let event = ModificationEvent {
            kind,
            ids,
            revision: revision.0,
        };
        debug!(revision = event.revision, count = event.ids.len(), "catalog {}", event.kind);
        for listener in &self.listeners {
            listener(&event);
        }
        Ok(event)
    }

    fn write_entry(
        entries: &TransactionalTree,
        index: &TransactionalTree,
        entry: &CatalogEntry,
    ) -> TxResult<()> {
        let key = IdKey::new(entry.id.as_str());
        let previous: BTreeSet<String> = match entries.get(key.as_bytes())? {
            Some(value) => decode::<CatalogEntry>(&value).map_err(abort)?.labels,
            None => BTreeSet::new(),
        };

        for label in previous.difference(&entry.labels) {
            Self::unindex(index, label, &entry.id)?;
        }
        for label in entry.labels.difference(&previous) {
            Self::index(index, label, &entry.id)?;
        }

        entries.insert(key.as_bytes(), encode(entry).map_err(abort)?)?;
        Ok(())
    }

    fn delete_entry(entries: &TransactionalTree, index: &TransactionalTree, id: &str) -> TxResult<()> {
        let key = IdKey::new(id);
        if let Some(value) = entries.remove(key.as_bytes())? {
            let entry: CatalogEntry = decode(&value).map_err(abort)?;
            for label in &entry.labels {
                Self::unindex(index, label, id)?;
            }
        }
        Ok(())
    }

    fn index(index: &TransactionalTree, label: &str, id: &str) -> TxResult<()> {
        let mut ids: Vec<String> = match index.get(label.as_bytes())? {
            Some(value) => decode(&value).map_err(abort)?,
            None => Vec::new(),
        };
        if let Err(pos) = ids.binary_search_by(|probe| probe.as_str().cmp(id)) {
            ids.insert(pos, id.to_string());
            index.insert(label.as_bytes(), encode(&ids).map_err(abort)?)?;
        }
        Ok(())
    }

    fn unindex(index: &TransactionalTree, label: &str, id: &str) -> TxResult<()> {
        let Some(value) = index.get(label.as_bytes())? else {
            return Ok(());
        };
        let mut ids: Vec<String> = decode(&value).map_err(abort)?;
        ids.retain(|existing| existing != id);
        if ids.is_empty() {
            index.remove(label.as_bytes())?;
        } else {
            index.insert(label.as_bytes(), encode(&ids).map_err(abort)?)?;
        }
        Ok(())
    }
}

impl CatalogStore for Database {
    fn find_entry(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.get_entry(id)?)
    }

    fn resolve_path(&self, id: &str) -> Result<Option<PathBuf>, CatalogError> {
        Ok(self.asset_path(id)?)
    }

    fn list_label_vocabulary(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.list_labels()?)
    }

    fn notify_entries_changed(
        &mut self,
        entries: &[CatalogEntry],
        batched: bool,
    ) -> Result<Vec<ModificationEvent>, CatalogError> {
        for entry in entries {
            let known = self
                .entries
                .contains_key(IdKey::new(entry.id.as_str()))
                .map_err(DbError::from)?;
            if !known {
                return Err(CatalogError::UnknownEntry(entry.id.clone()));
            }
        }

        if batched {
            Ok(vec![self.commit(ModificationKind::EntryModified, entries, &[])?])
        } else {
            entries
                .iter()
                .map(|entry| {
                    self.commit(ModificationKind::EntryModified, std::slice::from_ref(entry), &[])
                        .map_err(CatalogError::from)
                })
                .collect()
        }
    }
}
