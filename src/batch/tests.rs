use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::CatalogEntry;
use crate::catalog::{CatalogStore, MemoryCatalog};
use crate::compose::FragmentSet;
use crate::labels::PendingIntent;
use crate::testing::TestDb;

use super::{ApplyError, apply_all, preview_all};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn env_fragments() -> FragmentSet {
    FragmentSet {
        prefix0: "env".into(),
        prefix2: "ui".into(),
        prepend_folder_name: true,
        ..FragmentSet::default()
    }
}

#[test]
fn test_empty_selection_is_blocked() {
    let mut catalog = MemoryCatalog::new();
    let err = apply_all(&[], &env_fragments(), &PendingIntent::new(), &mut catalog).unwrap_err();
    assert!(matches!(err, ApplyError::EmptySelection));
    assert_eq!(err.to_string(), "Select at least one asset.");
    assert!(catalog.events().is_empty());
}

#[test]
fn test_one_valid_one_invalid() {
    let mut catalog = MemoryCatalog::new()
        .with_entry(CatalogEntry::new("btn", "Assets/Widgets/Button.prefab"))
        .with_asset("raw", "Assets/Raw/notes.txt");

    let report = apply_all(
        &ids(&["btn", "raw"]),
        &env_fragments(),
        &PendingIntent::new(),
        &mut catalog,
    )
    .unwrap();

    assert_eq!(report.changed_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(
        report.unresolved[0].to_string(),
        "Assets/Raw/notes.txt is not part of the catalog"
    );
    assert_eq!(catalog.entry("btn").unwrap().address, "env.ui.Widgets.Button");
    assert!(catalog.entry("raw").is_none());
}

#[test]
fn test_unknown_id_reports_id() {
    let mut catalog =
        MemoryCatalog::new().with_entry(CatalogEntry::new("btn", "Assets/Widgets/Button.prefab"));
    let report = apply_all(
        &ids(&["ghost", "btn"]),
        &FragmentSet::default(),
        &PendingIntent::new(),
        &mut catalog,
    )
    .unwrap();

    assert_eq!(report.unresolved[0].to_string(), "ghost is not part of the catalog");
    assert_eq!(catalog.entry("btn").unwrap().address, "Button");
}

#[test]
fn test_single_batched_notification() {
    let mut catalog = MemoryCatalog::new()
        .with_entry(CatalogEntry::new("a", "Assets/Icons/A.png"))
        .with_entry(CatalogEntry::new("b", "Assets/Icons/B.png"))
        .with_entry(CatalogEntry::new("c", "Assets/Icons/C.png"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    catalog.subscribe(Box::new(move |event| sink.borrow_mut().push(event.ids.clone())));

    let report = apply_all(
        &ids(&["a", "b", "c"]),
        &FragmentSet::default(),
        &PendingIntent::new(),
        &mut catalog,
    )
    .unwrap();

    assert_eq!(report.revision, Some(1));
    assert_eq!(*seen.borrow(), vec![ids(&["a", "b", "c"])]);
}

#[test]
fn test_no_notification_when_nothing_resolves() {
    let mut catalog = MemoryCatalog::new();
    let report = apply_all(
        &ids(&["x", "y"]),
        &FragmentSet::default(),
        &PendingIntent::new(),
        &mut catalog,
    )
    .unwrap();
    assert_eq!(report.warning_count(), 2);
    assert_eq!(report.revision, None);
    assert!(catalog.events().is_empty());
}

#[test]
fn test_labels_applied_to_every_entry() {
    let mut catalog = MemoryCatalog::new()
        .with_entry(CatalogEntry::new("a", "Assets/A.png").with_labels(["old"]))
        .with_entry(CatalogEntry::new("b", "Assets/B.png"));
    let intent = PendingIntent::from_lists(&ids(&["beta"]), &ids(&["old"]));

    let report = apply_all(&ids(&["a", "b"]), &FragmentSet::default(), &intent, &mut catalog).unwrap();

    for id in ["a", "b"] {
        let labels: Vec<_> = catalog.entry(id).unwrap().labels.iter().cloned().collect();
        assert_eq!(labels, vec!["beta"]);
    }
    assert_eq!(report.renamed[0].labels_changed, 2);
    assert_eq!(report.renamed[1].labels_changed, 1);
}

#[test]
fn test_duplicate_ids_are_staged_once() {
    let mut catalog = MemoryCatalog::new().with_entry(CatalogEntry::new("a", "Assets/A.png"));
    let report = apply_all(
        &ids(&["a", "a"]),
        &FragmentSet::default(),
        &PendingIntent::new(),
        &mut catalog,
    )
    .unwrap();
    assert_eq!(report.changed_count(), 1);
    assert_eq!(catalog.events()[0].ids, vec!["a"]);
}

#[test]
fn test_preview_leaves_catalog_untouched() {
    let catalog = MemoryCatalog::new().with_entry(CatalogEntry::new("btn", "Assets/Widgets/Button.prefab"));
    let report = preview_all(
        &ids(&["btn"]),
        &env_fragments(),
        &PendingIntent::from_lists(&ids(&["beta"]), &[]),
        &catalog,
    )
    .unwrap();

    assert_eq!(report.renamed[0].address, "env.ui.Widgets.Button");
    assert_eq!(report.revision, None);
    assert_eq!(catalog.entry("btn").unwrap().address, "Assets/Widgets/Button.prefab");
    assert!(catalog.events().is_empty());
}

#[test]
fn test_apply_against_sled_catalog() {
    let mut test_db = TestDb::new();
    let db = test_db.db_mut();
    db.add_label("beta").unwrap();
    db.add_entry("btn", Some(Path::new("Assets/Widgets/Button.prefab")), None)
        .unwrap();
    db.add_entry("icon", Some(Path::new("Assets/Sprites/Icon.png")), None)
        .unwrap();
    db.register_asset("raw", "Assets/Raw/notes.txt").unwrap();
    let before = db.revision().unwrap();

    let intent = PendingIntent::from_lists(&ids(&["beta"]), &[]);
    let report = apply_all(&ids(&["btn", "raw", "icon"]), &env_fragments(), &intent, db).unwrap();

    assert_eq!(report.changed_count(), 2);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(db.revision().unwrap(), before + 1);
    assert_eq!(
        db.find_entry("icon").unwrap().unwrap().address,
        "env.ui.Sprites.Icon"
    );
    assert_eq!(db.find_by_label("beta").unwrap(), vec!["btn", "icon"]);
}
