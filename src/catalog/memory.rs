use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{CatalogError, CatalogStore, Listener, ModificationEvent, ModificationKind};
use crate::CatalogEntry;

/// In-memory catalog
///
/// Keeps every modification event it emits so callers can inspect how a
/// batch was reported.
///
/// # Examples
///
/// ```
/// use addressor::CatalogEntry;
/// use addressor::catalog::{CatalogStore, MemoryCatalog};
///
/// let catalog = MemoryCatalog::new()
///     .with_entry(CatalogEntry::new("g1", "Assets/UI/Button.prefab"))
///     .with_label("beta");
/// assert!(catalog.find_entry("g1").unwrap().is_some());
/// assert_eq!(catalog.list_label_vocabulary().unwrap(), vec!["beta"]);
/// ```
#[derive(Default)]
pub struct MemoryCatalog {
    entries: BTreeMap<String, CatalogEntry>,
    assets: BTreeMap<String, PathBuf>,
    vocabulary: Vec<String>,
    events: Vec<ModificationEvent>,
    revision: u64,
    listeners: Vec<Listener>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a known asset that is not addressable
    #[must_use]
    pub fn with_asset(mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.assets.insert(id.into(), path.into());
        self
    }

    /// Register an addressable entry (and its asset)
    #[must_use]
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.assets.insert(entry.id.clone(), entry.asset_path.clone());
        self.entries.insert(entry.id.clone(), entry);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !self.vocabulary.contains(&label) {
            self.vocabulary.push(label);
        }
        self
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Every event emitted so far, oldest first
    #[must_use]
    pub fn events(&self) -> &[ModificationEvent] {
        &self.events
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn emit(&mut self, ids: Vec<String>) -> ModificationEvent {
        self.revision += 1;
        let event = ModificationEvent {
            kind: ModificationKind::EntryModified,
            ids,
            revision: self.revision,
        };
        for listener in &self.listeners {
            listener(&event);
        }
        self.events.push(event.clone());
        event
    }
}

impl CatalogStore for MemoryCatalog {
    fn find_entry(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.entries.get(id).cloned())
    }

    fn resolve_path(&self, id: &str) -> Result<Option<PathBuf>, CatalogError> {
        Ok(self.assets.get(id).cloned())
    }

    fn list_label_vocabulary(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.vocabulary.clone())
    }

    fn notify_entries_changed(
        &mut self,
        entries: &[CatalogEntry],
        batched: bool,
    ) -> Result<Vec<ModificationEvent>, CatalogError> {
        if let Some(missing) = entries.iter().find(|e| !self.entries.contains_key(&e.id)) {
            return Err(CatalogError::UnknownEntry(missing.id.clone()));
        }
        for entry in entries {
            self.entries.insert(entry.id.clone(), entry.clone());
        }

        if batched {
            let ids = entries.iter().map(|e| e.id.clone()).collect();
            Ok(vec![self.emit(ids)])
        } else {
            Ok(entries.iter().map(|e| self.emit(vec![e.id.clone()])).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_batched_notification_is_one_event() {
        let mut catalog = MemoryCatalog::new()
            .with_entry(CatalogEntry::new("a", "Assets/A.png"))
            .with_entry(CatalogEntry::new("b", "Assets/B.png"));
        let changed = vec![
            CatalogEntry::new("a", "Assets/A.png").with_address("A"),
            CatalogEntry::new("b", "Assets/B.png").with_address("B"),
        ];

        let events = catalog.notify_entries_changed(&changed, true).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ids, vec!["a", "b"]);
        assert_eq!(catalog.revision(), 1);
        assert_eq!(catalog.entry("a").unwrap().address, "A");
    }

    #[test]
    fn test_unbatched_notification_is_one_event_per_entry() {
        let mut catalog = MemoryCatalog::new()
            .with_entry(CatalogEntry::new("a", "Assets/A.png"))
            .with_entry(CatalogEntry::new("b", "Assets/B.png"));
        let changed = vec![
            CatalogEntry::new("a", "Assets/A.png"),
            CatalogEntry::new("b", "Assets/B.png"),
        ];

        let events = catalog.notify_entries_changed(&changed, false).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(catalog.revision(), 2);
    }

    #[test]
    fn test_notify_rejects_unknown_entry() {
        let mut catalog = MemoryCatalog::new();
        let err = catalog
            .notify_entries_changed(&[CatalogEntry::new("ghost", "Assets/G.png")], true)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownEntry(id) if id == "ghost"));
        assert!(catalog.events().is_empty());
    }

    #[test]
    fn test_listener_sees_event() {
        let seen = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&seen);
        let mut catalog =
            MemoryCatalog::new().with_entry(CatalogEntry::new("a", "Assets/A.png"));
        catalog.subscribe(Box::new(move |event| counter.set(counter.get() + event.ids.len())));

        catalog
            .notify_entries_changed(&[CatalogEntry::new("a", "Assets/A.png")], true)
            .unwrap();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_resolve_path_covers_plain_assets() {
        let catalog = MemoryCatalog::new().with_asset("x", "Assets/Raw/x.txt");
        assert_eq!(
            catalog.resolve_path("x").unwrap(),
            Some(PathBuf::from("Assets/Raw/x.txt"))
        );
        assert!(catalog.find_entry("x").unwrap().is_none());
    }
}
