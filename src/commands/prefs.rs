//! Prefs command - remembered fragments

use crate::{AddressorError, cli::PrefsCommands, compose::FORMAT_HINT, prefs::Preferences};
use colored::Colorize;

type Result<T> = std::result::Result<T, AddressorError>;

/// Execute a prefs subcommand
///
/// # Errors
/// Returns an error if the preference file cannot be read or removed
pub fn execute(prefs: &Preferences, command: &PrefsCommands, quiet: bool) -> Result<()> {
    match command {
        PrefsCommands::Show => {
            let fragments = prefs.load()?;
            if quiet {
                println!("{}", fragments.compose("{AssetName}", "{FolderName}"));
                return Ok(());
            }
            println!("{} {}", "Preferences:".bold(), prefs.path().display());
            println!("  prefix0:             {:?}", fragments.prefix0);
            println!("  prefix1:             {:?}", fragments.prefix1);
            println!("  prefix2:             {:?}", fragments.prefix2);
            println!("  postfix0:            {:?}", fragments.postfix0);
            println!("  prepend_folder_name: {}", fragments.prepend_folder_name);
            println!();
            println!("  {}", FORMAT_HINT.dimmed());
            println!(
                "  Next address: {}",
                fragments.compose("{AssetName}", "{FolderName}").cyan()
            );
            Ok(())
        }
        PrefsCommands::Reset => {
            let removed = prefs.reset()?;
            if !quiet {
                if removed {
                    println!("{} Forgot remembered fragments", "✓".green());
                } else {
                    println!("No remembered fragments.");
                }
            }
            Ok(())
        }
    }
}
