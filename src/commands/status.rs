//! Status command - catalog counts and revision

use crate::{AddressorError, db::Database};
use colored::Colorize;

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute the status command
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &Database, quiet: bool) -> Result<()> {
    let assets = db.list_assets()?.len();
    let entries = db.count();
    let labels = db.list_labels()?.len();
    let revision = db.revision()?;

    if quiet {
        println!("{entries} {assets} {labels} {revision}");
        return Ok(());
    }

    println!("{}", "Catalog status".bold());
    println!("  Entries:  {}", entries.to_string().green());
    println!("  Assets:   {assets}");
    println!("  Labels:   {labels}");
    println!("  Revision: {revision}");
    Ok(())
}
