//! Entry command - inspect and edit addressable entries

use crate::{AddressorError, cli::EntryCommands, db::Database, output};
use colored::Colorize;

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute an entry subcommand
///
/// # Errors
/// Returns an error if database operations fail, the entry is unknown, or
/// JSON output cannot be produced.
pub fn execute(db: &mut Database, command: &EntryCommands, quiet: bool) -> Result<()> {
    match command {
        EntryCommands::Add { id, path, address } => {
            let entry = db.add_entry(id, path.as_deref(), address.clone())?;
            if !quiet {
                println!("{} Entry '{}' addressable as {}", "✓".green(), entry.id, entry.address.cyan());
            }
            Ok(())
        }
        EntryCommands::Remove { id } => {
            if db.remove_entry(id)? {
                if !quiet {
                    println!("{} Removed entry '{id}'", "✓".green());
                }
            } else if !quiet {
                println!("Entry '{id}' not found in catalog.");
            }
            Ok(())
        }
        EntryCommands::Show { id } => {
            let entry = db
                .get_entry(id)?
                .ok_or_else(|| AddressorError::InvalidInput(format!("'{id}' is not part of the catalog")))?;
            if quiet {
                println!("{}", entry.address);
            } else {
                println!("{}      {}", "Id:".bold(), entry.id);
                println!("{}    {}", "Path:".bold(), entry.asset_path.display());
                println!("{} {}", "Address:".bold(), entry.address.cyan());
                let labels = entry.labels.iter().cloned().collect::<Vec<_>>().join(", ");
                println!("{}  {}", "Labels:".bold(), if labels.is_empty() { "-".to_string() } else { labels });
            }
            Ok(())
        }
        EntryCommands::List { json } => list_entries(db, *json, quiet),
    }
}

fn list_entries(db: &Database, json: bool, quiet: bool) -> Result<()> {
    let entries = db.list_entries()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !quiet {
            println!("No entries found in catalog.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Entries in catalog:");
    }
    for entry in &entries {
        println!("{}", output::entry_line(entry, quiet));
    }
    Ok(())
}
