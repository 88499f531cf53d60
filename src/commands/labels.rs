//! Labels command - vocabulary management

use crate::{AddressorError, cli::LabelsCommands, db::Database, output};
use colored::Colorize;
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute the labels management command
///
/// # Errors
/// Returns an error if database operations fail or user interaction fails
pub fn execute(db: &mut Database, command: &LabelsCommands, quiet: bool) -> Result<()> {
    match command {
        LabelsCommands::List => list_labels(db, quiet),
        LabelsCommands::Add { label } => add_label(db, label, quiet),
        LabelsCommands::Remove { label, yes } => remove_label(db, label, *yes, quiet),
    }
}

fn list_labels(db: &Database, quiet: bool) -> Result<()> {
    let labels = db.list_labels()?;

    if labels.is_empty() {
        if !quiet {
            println!("No labels defined. Add one with: addressor labels add <LABEL>");
        }
        return Ok(());
    }

    if !quiet {
        println!("Labels in catalog:");
    }
    for label in &labels {
        let count = db.find_by_label(label)?.len();
        println!("{}", output::label_with_count(label, count, quiet));
    }
    Ok(())
}

fn add_label(db: &mut Database, label: &str, quiet: bool) -> Result<()> {
    let added = db.add_label(label)?;
    if !quiet {
        if added {
            println!("{} Defined label '{}'", "✓".green(), label.trim());
        } else {
            println!("Label '{}' already exists.", label.trim());
        }
    }
    Ok(())
}

fn remove_label(db: &mut Database, label: &str, yes: bool, quiet: bool) -> Result<()> {
    let defined = db.list_labels()?.iter().any(|l| l == label);
    let carriers = db.find_by_label(label)?;

    if !defined && carriers.is_empty() {
        if !quiet {
            println!("Label '{label}' not found in catalog.");
        }
        return Ok(());
    }

    if !quiet && !carriers.is_empty() {
        println!(
            "Label '{label}' is carried by {} entr{}:",
            carriers.len(),
            if carriers.len() == 1 { "y" } else { "ies" }
        );
        for id in &carriers {
            println!("  - {id}");
        }
        println!();
    }

    if !yes && !confirm("Remove label from the catalog and every entry?", quiet)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let stripped = db.remove_label(label)?;
    if !quiet {
        println!(
            "Removed label '{label}' from {stripped} entr{}.",
            if stripped == 1 { "y" } else { "ies" }
        );
    }
    Ok(())
}

/// Prompt user for yes/no confirmation using dialoguer
fn confirm(prompt: &str, quiet: bool) -> Result<bool> {
    if quiet {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AddressorError::InvalidInput(format!("Confirmation failed: {e}")))
}
