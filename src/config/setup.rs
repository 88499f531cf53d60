//! First-run setup
//!
//! Creates the first catalog and the config file that points at it.

use super::AddressorConfig;
use crate::db::Database;
use config::ConfigError;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::Path;

/// Prompt for the first catalog and the confirmation setting, create the
/// catalog and save the configuration
///
/// # Errors
///
/// Returns `ConfigError` if a prompt fails, the data directory cannot be
/// determined, the catalog cannot be created, or the configuration cannot
/// be saved.
pub fn first_time_setup() -> Result<AddressorConfig, ConfigError> {
    println!("No configuration found. Let's create your first asset catalog.\n");
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Catalog name")
        .default("main".to_string())
        .interact_text()
        .map_err(prompt_error)?;

    let suggested = AddressorConfig::catalog_location(Path::new(&name))?;
    let location: String = Input::with_theme(&theme)
        .with_prompt("Catalog directory")
        .default(suggested.to_string_lossy().into_owned())
        .interact_text()
        .map_err(prompt_error)?;
    let location = AddressorConfig::catalog_location(Path::new(&location))?;

    let confirm = Confirm::with_theme(&theme)
        .with_prompt("Ask for confirmation before applying a batch?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    Database::open(&location)
        .map_err(|e| ConfigError::Message(format!("Failed to create catalog: {e}")))?;

    let mut config = AddressorConfig {
        confirm,
        ..AddressorConfig::default()
    };
    config.catalogs.insert(name.clone(), location.clone());
    config.default_catalog = Some(name);
    config.save()?;

    println!(
        "\nCatalog created at {}. Register assets with: addressor entry add <ID> --path <PATH>",
        location.display()
    );
    Ok(config)
}

fn prompt_error(e: dialoguer::Error) -> ConfigError {
    ConfigError::Message(format!("Failed to read input: {e}"))
}
