//! Wizard command - interactive form in front of apply
//!
//! Walks through the four fragments and the folder switch (pre-filled from
//! the remembered values), then asks once per vocabulary label whether to
//! keep, add or remove it, previews the batch and applies it.

use std::io;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use super::apply::{collect_selection, print_guidance};
use crate::batch::{apply_all, preview_all};
use crate::cli::SelectionArgs;
use crate::compose::{FORMAT_HINT, FragmentSet};
use crate::db::Database;
use crate::labels::PendingIntent;
use crate::prefs::Preferences;
use crate::{AddressorError, output};

type Result<T> = std::result::Result<T, AddressorError>;

const LABEL_CHOICES: [&str; 3] = ["keep", "+ add", "- remove"];

/// Execute the wizard
///
/// # Errors
/// Returns an error if a prompt fails, preferences cannot be read or written,
/// or the catalog fails.
pub fn execute(db: &mut Database, selection: &SelectionArgs, quiet: bool) -> Result<()> {
    let ids = if selection.stdin {
        collect_selection(db, selection, Some(&mut io::stdin().lock()))?
    } else {
        collect_selection(db, selection, None)?
    };
    if ids.is_empty() {
        print_guidance(quiet);
        return Ok(());
    }

    let prefs = Preferences::locate()?;
    let fragments = prompt_fragments(prefs.load()?)?;
    let intent = prompt_labels(&db.list_labels()?)?;

    let report = preview_all(&ids, &fragments, &intent, &*db)?;
    report.print("Preview", false);
    println!("Labels: {}", output::intent_summary(&intent));

    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Apply to {} selected item(s)?", ids.len()))
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if !proceed {
        println!("Operation cancelled.");
        return Ok(());
    }

    prefs.save(&fragments)?;
    let report = apply_all(&ids, &fragments, &intent, db)?;
    report.print("Apply", quiet);
    Ok(())
}

fn prompt_fragments(stored: FragmentSet) -> Result<FragmentSet> {
    println!("{}", FORMAT_HINT.dimmed());

    let prefix0 = prompt_text("prefix0", stored.prefix0)?;
    let prefix1 = prompt_text("prefix1", stored.prefix1)?;
    let prefix2 = prompt_text("prefix2", stored.prefix2)?;
    let prepend_folder_name = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Prepend folder name?")
        .default(stored.prepend_folder_name)
        .interact()
        .map_err(prompt_error)?;
    let postfix0 = prompt_text("postfix", stored.postfix0)?;

    let fragments = FragmentSet {
        prefix0,
        prefix1,
        prefix2,
        postfix0,
        prepend_folder_name,
    };
    println!(
        "Addresses will look like: {}",
        fragments.compose("{AssetName}", "{FolderName}").cyan()
    );
    Ok(fragments)
}

fn prompt_text(name: &str, initial: String) -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(name)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_labels(vocabulary: &[String]) -> Result<PendingIntent> {
    let mut intent = PendingIntent::new();
    if vocabulary.is_empty() {
        return Ok(intent);
    }

    println!("{}", "Labels".bold());
    for label in vocabulary {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(&LABEL_CHOICES)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        let (add, remove) = choice_flags(choice);
        intent.set_intent(label, add, remove);
    }

    for label in vocabulary {
        println!("{}", output::intent_row(label, intent.intent(label)));
    }
    Ok(intent)
}

/// Checkbox pair for a menu choice; anything unknown keeps the label
const fn choice_flags(choice: usize) -> (bool, bool) {
    match choice {
        1 => (true, false),
        2 => (false, true),
        _ => (false, false),
    }
}

fn prompt_error(e: dialoguer::Error) -> AddressorError {
    AddressorError::InvalidInput(format!("Prompt failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelIntent;

    #[test]
    fn test_choice_flags_match_menu() {
        let mut intent = PendingIntent::new();
        for (label, choice) in [("keep", 0), ("beta", 1), ("old", 2)] {
            let (add, remove) = choice_flags(choice);
            intent.set_intent(label, add, remove);
        }
        assert_eq!(intent.intent("keep"), LabelIntent::Unchanged);
        assert_eq!(intent.intent("beta"), LabelIntent::Add);
        assert_eq!(intent.intent("old"), LabelIntent::Remove);
    }

    #[test]
    fn test_menu_order_matches_intent_markers() {
        assert!(LABEL_CHOICES[1].starts_with(LabelIntent::Add.marker()));
        assert!(LABEL_CHOICES[2].starts_with(LabelIntent::Remove.marker()));
    }
}
