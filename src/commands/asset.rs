//! Asset command - known assets, addressable or not

use crate::{AddressorError, cli::AssetCommands, db::Database, output};
use colored::Colorize;

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute an asset subcommand
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &mut Database, command: &AssetCommands, quiet: bool) -> Result<()> {
    match command {
        AssetCommands::Add { id, path } => {
            db.register_asset(id, path)?;
            if !quiet {
                println!("{} Registered asset '{id}' at {}", "✓".green(), path.display());
            }
            Ok(())
        }
        AssetCommands::List => list_assets(db, quiet),
    }
}

fn list_assets(db: &Database, quiet: bool) -> Result<()> {
    let assets = db.list_assets()?;

    if assets.is_empty() {
        if !quiet {
            println!("No assets found in catalog.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Assets in catalog ({} = addressable):", "●".green());
    }
    for (id, path) in &assets {
        let addressable = db.get_entry(id)?.is_some();
        println!("{}", output::asset_line(id, path, addressable, quiet));
    }
    Ok(())
}
