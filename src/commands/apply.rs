//! Apply command - rename and relabel a selection in one batch

use std::collections::HashSet;
use std::io::{self, BufRead};

use colored::Colorize;
use dialoguer::Confirm;
use tracing::warn;

use crate::batch::{ApplyError, ApplyReport, apply_all, preview_all};
use crate::cli::{ApplyArgs, SelectionArgs};
use crate::compose::FragmentSet;
use crate::config::AddressorConfig;
use crate::db::Database;
use crate::labels::PendingIntent;
use crate::prefs::Preferences;
use crate::{AddressorError, output};

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute the apply command
///
/// # Errors
/// Returns an error if the selection cannot be resolved, preferences cannot
/// be read or written, the catalog fails, or the confirmation prompt fails.
pub fn execute(
    db: &mut Database,
    args: &ApplyArgs,
    config: &AddressorConfig,
    quiet: bool,
) -> Result<()> {
    let prefs = Preferences::locate()?;
    let fragments = args.fragments.merge_onto(prefs.load()?);

    for label in args.intent.conflicts() {
        if !quiet {
            eprintln!(
                "{} '{label}' is both added and removed; it will be removed",
                "⚠".yellow()
            );
        }
    }
    let intent = args.intent.to_intent();
    warn_unknown_labels(db, &intent, quiet)?;

    let selection = if args.selection.stdin {
        collect_selection(db, &args.selection, Some(&mut io::stdin().lock()))?
    } else {
        collect_selection(db, &args.selection, None)?
    };
    if selection.is_empty() {
        print_guidance(quiet);
        return Ok(());
    }

    if args.dry_run {
        let report = preview_all(&selection, &fragments, &intent, &*db)?;
        print_dry_run(&report, &intent);
        return Ok(());
    }

    if config.confirm && !args.yes && !confirm_apply(selection.len(), &fragments, &intent)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    if !args.no_save_prefs {
        prefs.save(&fragments)?;
    }

    let report = apply_all(&selection, &fragments, &intent, db)?;
    report.print("Apply", quiet);
    Ok(())
}

/// Resolve the selection arguments to an ordered, de-duplicated list of ids
///
/// Positional ids come first, then glob matches, then label matches, then
/// stdin lines. Ids that are not in the catalog are kept so the batch can
/// report them.
///
/// # Errors
/// Returns an error for an invalid glob pattern, a catalog read failure, or
/// an unreadable `input`.
pub fn collect_selection(
    db: &Database,
    args: &SelectionArgs,
    input: Option<&mut dyn BufRead>,
) -> Result<Vec<String>> {
    let mut ids: Vec<String> = args.ids.clone();

    for pattern in &args.globs {
        ids.extend(db.find_by_path_glob(pattern)?);
    }
    for label in &args.with_labels {
        ids.extend(db.find_by_label(label)?);
    }
    if let Some(reader) = input {
        for line in reader.lines() {
            let line = line?;
            let id = line.trim();
            if !id.is_empty() {
                ids.push(id.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
    Ok(ids)
}

/// Print the message shown instead of applying an empty selection
pub fn print_guidance(quiet: bool) {
    if !quiet {
        println!("{}", ApplyError::EmptySelection.to_string().yellow());
        println!("Pass ids, --glob, --with-label or --stdin to choose entries.");
    }
}

/// Warn about labels outside the catalog vocabulary
///
/// They are still applied.
///
/// # Errors
/// Returns an error if the vocabulary cannot be read.
fn warn_unknown_labels(db: &Database, intent: &PendingIntent, quiet: bool) -> Result<()> {
    if intent.is_empty() {
        return Ok(());
    }
    let vocabulary = db.list_labels()?;
    for (label, _) in intent.iter() {
        if !vocabulary.iter().any(|known| known == label) {
            warn!(label, "label is not defined in the catalog vocabulary");
            if !quiet {
                eprintln!(
                    "{} Label '{label}' is not defined. Add it with: addressor labels add {label}",
                    "⚠".yellow()
                );
            }
        }
    }
    Ok(())
}

/// Print dry-run preview
pub fn print_dry_run(report: &ApplyReport, intent: &PendingIntent) {
    println!("{}", "=== Dry Run Mode ===".yellow().bold());
    println!(
        "Would rename {} entr{} ({})",
        report.changed_count(),
        if report.changed_count() == 1 { "y" } else { "ies" },
        output::intent_summary(intent)
    );
    report.print("Dry Run", false);
    println!("\n{}", "Run without --dry-run to apply changes.".yellow());
}

fn confirm_apply(count: usize, fragments: &FragmentSet, intent: &PendingIntent) -> Result<bool> {
    let example = fragments.compose("{AssetName}", "{FolderName}");
    let prompt = format!(
        "Rename {count} selected item(s) to '{example}' ({})?",
        output::intent_summary(intent)
    );
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AddressorError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;
    use std::io::Cursor;
    use std::path::Path;

    fn seeded() -> TestDb {
        let mut test_db = TestDb::new();
        let db = test_db.db_mut();
        db.add_entry("btn", Some(Path::new("Assets/UI/Button.prefab")), None)
            .unwrap();
        db.add_entry("icon", Some(Path::new("Assets/UI/Icon.png")), None)
            .unwrap();
        db.register_asset("snd", "Assets/Audio/click.wav").unwrap();
        let icon = db.get_entry("icon").unwrap().unwrap().with_labels(["beta"]);
        crate::catalog::CatalogStore::notify_entries_changed(db, &[icon], true).unwrap();
        test_db
    }

    #[test]
    fn test_collect_selection_orders_and_dedupes() {
        let test_db = seeded();
        let args = SelectionArgs {
            ids: vec!["icon".into(), "ghost".into()],
            globs: vec!["Assets/UI/*".into()],
            with_labels: vec!["beta".into()],
            stdin: true,
        };
        let mut input = Cursor::new("snd\n\n  btn  \n");

        let ids = collect_selection(test_db.db(), &args, Some(&mut input)).unwrap();
        assert_eq!(ids, vec!["icon", "ghost", "btn", "snd"]);
    }

    #[test]
    fn test_collect_selection_empty() {
        let test_db = seeded();
        let ids = collect_selection(test_db.db(), &SelectionArgs::default(), None).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_collect_selection_bad_glob() {
        let test_db = seeded();
        let args = SelectionArgs {
            globs: vec!["[".into()],
            ..SelectionArgs::default()
        };
        assert!(collect_selection(test_db.db(), &args, None).is_err());
    }
}
