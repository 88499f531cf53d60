//! Db command - named catalogs in the configuration

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::{AddressorError, cli::DbCommands, config::AddressorConfig, db::Database};

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute a catalog management subcommand
///
/// # Errors
/// Returns an error if the name is already taken or unknown, the catalog
/// cannot be created, or the configuration cannot be saved.
pub fn execute(config: &mut AddressorConfig, command: &DbCommands, quiet: bool) -> Result<()> {
    match command {
        DbCommands::Add { name, path } => add_catalog(config, name, path, quiet),
        DbCommands::List => {
            list_catalogs(config, quiet);
            Ok(())
        }
        DbCommands::Remove { name, delete_files } => remove_catalog(config, name, *delete_files, quiet),
        DbCommands::SetDefault { name } => {
            config.set_default_catalog(name.clone())?;
            if !quiet {
                println!("{} '{name}' is now the default catalog", "✓".green());
            }
            Ok(())
        }
    }
}

fn add_catalog(config: &mut AddressorConfig, name: &str, path: &Path, quiet: bool) -> Result<()> {
    if let Ok(existing) = config.resolve_catalog(Some(name)) {
        return Err(AddressorError::InvalidInput(format!(
            "Catalog '{name}' is already configured at {}",
            existing.display()
        )));
    }

    let location = AddressorConfig::catalog_location(path)?;
    // Opening creates the sled directory, or picks up an existing catalog
    let entries = Database::open(&location)?.count();
    config.add_catalog(name.to_string(), location.clone())?;

    if !quiet {
        if entries == 0 {
            println!("{} Created catalog '{name}' at {}", "✓".green(), location.display());
        } else {
            println!(
                "{} Added existing catalog '{name}' at {} ({entries} entries)",
                "✓".green(),
                location.display()
            );
        }
    }

    if config.get_default_catalog().is_none() {
        config.set_default_catalog(name.to_string())?;
        if !quiet {
            println!("'{name}' is now the default catalog");
        }
    }
    Ok(())
}

fn list_catalogs(config: &AddressorConfig, quiet: bool) {
    if config.catalogs.is_empty() {
        if !quiet {
            println!("No catalogs configured.");
            println!("Add one with: addressor db add <name> <path>");
        }
        return;
    }

    if !quiet {
        println!("Configured catalogs:");
    }
    let default_catalog = config.get_default_catalog();
    for name in config.list_catalogs() {
        let Some(path) = config.get_catalog(name) else {
            continue;
        };
        if quiet {
            println!("{name}");
            continue;
        }
        let mut notes = Vec::new();
        if default_catalog == Some(name) {
            notes.push("default".green().to_string());
        }
        if !path.exists() {
            notes.push("missing".red().to_string());
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        println!("  {} -> {}{notes}", name.bold(), path.display());
    }
}

fn remove_catalog(config: &mut AddressorConfig, name: &str, delete_files: bool, quiet: bool) -> Result<()> {
    let path = config.resolve_catalog(Some(name))?.clone();
    let was_default = config.get_default_catalog().is_some_and(|d| d == name);

    config.remove_catalog(name)?;
    if !quiet {
        println!("{} Catalog '{name}' removed from configuration", "✓".green());
        if was_default {
            println!("No default catalog is set. Choose one with: addressor db set-default <name>");
        }
    }

    if !delete_files {
        if !quiet {
            println!("Catalog files at {} were kept", path.display());
        }
        return Ok(());
    }
    if path.exists() {
        fs::remove_dir_all(&path)?;
        if !quiet {
            println!("Deleted catalog files at {}", path.display());
        }
    }
    Ok(())
}
