//! Addressor CLI application entry point
//!
//! Renames addressable assets in bulk from a set of naming fragments and
//! toggles their labels in the same batch.
//!
//! # Usage
//!
//! ```bash
//! # Register assets and make them addressable
//! addressor entry add btn --path Assets/UI/Button.prefab
//! addressor asset add click Assets/Audio/click.wav
//!
//! # Rename everything under Assets/UI to env.ui.UI.<name>, tag it beta
//! addressor apply -g 'Assets/UI/*' --prefix0 env --prefix1 ui --folder -a beta
//!
//! # Preview only
//! addressor apply btn icon --postfix hd --dry-run
//!
//! # Fill in the fragments and labels interactively
//! addressor wizard -l beta
//!
//! # Quiet mode (only output results)
//! addressor -q entry list
//! ```
//!
//! # Configuration
//!
//! On first run, addressor will prompt for initial setup. Configuration is
//! stored in the user's config directory (`~/.config/addressor/config.toml` on
//! Linux), next to `prefs.toml` holding the last-used fragments.

use addressor::{
    AddressorError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, open_catalog},
    config::AddressorConfig,
    logging,
    prefs::Preferences,
};

type Result<T> = std::result::Result<T, AddressorError>;

const CONFIG_KEYS: &str = "quiet, confirm";

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `AddressorError` if the configuration key is invalid, value parsing
/// fails, or configuration save fails.
fn handle_config_command(mut config: AddressorConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(AddressorError::InvalidInput(
                    "Invalid format. Use: addressor config set key=value".into(),
                ));
            };
            let key = key.trim();
            let value = value.trim();

            let new_value = value.parse::<bool>().map_err(|_| {
                AddressorError::InvalidInput(format!(
                    "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
                ))
            })?;
            match key {
                "quiet" => config.quiet = new_value,
                "confirm" => config.confirm = new_value,
                _ => {
                    return Err(AddressorError::InvalidInput(format!(
                        "Unknown configuration key: '{key}'. Available keys: {CONFIG_KEYS}"
                    )));
                }
            }
            config.save()?;
            if !quiet {
                println!("Set {key} = {new_value}");
            }
        }
        ConfigCommands::Get { key } => match key.as_str() {
            "quiet" => println!("{}", config.quiet),
            "confirm" => println!("{}", config.confirm),
            _ => {
                return Err(AddressorError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {CONFIG_KEYS}"
                )));
            }
        },
    }
    Ok(())
}

/// Main entry point for the addressor application
///
/// Parses command-line arguments, loads configuration, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `AddressorError` if configuration loading fails, the catalog cannot
/// be opened, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    let mut config = AddressorConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    let catalog = cli.db_args.db.as_deref();
    match &cli.command {
        Commands::Db { command } => commands::catalogs(&mut config, command, quiet),
        Commands::Config { command } => handle_config_command(config, command, quiet),
        Commands::Prefs { command } => commands::prefs(&Preferences::locate()?, command, quiet),
        Commands::Apply(args) => commands::apply(&mut open_catalog(&config, catalog)?, args, &config, quiet),
        Commands::Wizard { selection } => commands::wizard(&mut open_catalog(&config, catalog)?, selection, quiet),
        Commands::Entry { command } => commands::entry(&mut open_catalog(&config, catalog)?, command, quiet),
        Commands::Asset { command } => commands::asset(&mut open_catalog(&config, catalog)?, command, quiet),
        Commands::Labels { command } => commands::labels(&mut open_catalog(&config, catalog)?, command, quiet),
        Commands::Status => commands::status(&open_catalog(&config, catalog)?, quiet),
    }
}
