//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for addressor using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **apply**: Rename and relabel selected entries in one batch
//! - **wizard**: Same as apply, filling the fragments and labels in interactively
//! - **entry** / **asset**: Inspect and edit catalog contents
//! - **labels**: Manage the catalog's label vocabulary
//! - **prefs**: Show or reset the remembered fragments
//! - **db**: Manage multiple catalogs (add, remove, list, set-default)
//! - **config**: Get and set configuration values
//!
//! # Selection
//!
//! Commands that work on a batch take ids positionally, plus any assets whose
//! path matches `--glob`, any entries carrying `--with-label`, and ids read
//! from stdin with `--stdin`.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::compose::FragmentSet;
use crate::labels::PendingIntent;

/// Shared argument selecting the catalog to work on
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// Catalog name to use (overrides default)
    #[arg(long = "db", value_name = "NAME", global = true)]
    pub db: Option<String>,
}

/// Which assets a batch works on
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Asset ids to process
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Select assets whose path matches a glob (can repeat: -g 'Assets/UI/*' -g '*.png')
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    pub globs: Vec<String>,

    /// Select entries that carry a label
    #[arg(short = 'l', long = "with-label", value_name = "LABEL")]
    pub with_labels: Vec<String>,

    /// Read ids from stdin, one per line
    #[arg(long = "stdin")]
    pub stdin: bool,
}

/// Naming fragments; omitted ones fall back to the remembered values
#[derive(Args, Debug, Clone, Default)]
pub struct FragmentArgs {
    /// First prefix
    #[arg(long = "prefix0", value_name = "TEXT")]
    pub prefix0: Option<String>,

    /// Second prefix
    #[arg(long = "prefix1", value_name = "TEXT")]
    pub prefix1: Option<String>,

    /// Third prefix
    #[arg(long = "prefix2", value_name = "TEXT")]
    pub prefix2: Option<String>,

    /// Postfix appended after the asset name
    #[arg(long = "postfix", visible_alias = "postfix0", value_name = "TEXT")]
    pub postfix0: Option<String>,

    /// Insert the containing folder name before the asset name
    #[arg(long = "folder", conflicts_with = "no_folder")]
    pub folder: bool,

    /// Do not insert the containing folder name
    #[arg(long = "no-folder", conflicts_with = "folder")]
    pub no_folder: bool,

    /// Ignore remembered fragments for anything not given here
    #[arg(long = "fresh")]
    pub fresh: bool,
}

impl FragmentArgs {
    /// Overlay the given fragments onto `stored`
    #[must_use]
    pub fn merge_onto(&self, stored: FragmentSet) -> FragmentSet {
        let base = if self.fresh { FragmentSet::default() } else { stored };
        FragmentSet {
            prefix0: self.prefix0.clone().unwrap_or(base.prefix0),
            prefix1: self.prefix1.clone().unwrap_or(base.prefix1),
            prefix2: self.prefix2.clone().unwrap_or(base.prefix2),
            postfix0: self.postfix0.clone().unwrap_or(base.postfix0),
            prepend_folder_name: if self.folder {
                true
            } else if self.no_folder {
                false
            } else {
                base.prepend_folder_name
            },
        }
    }
}

/// Labels to add and remove
#[derive(Args, Debug, Clone, Default)]
pub struct IntentArgs {
    /// Label to add to every selected entry (can repeat)
    #[arg(short = 'a', long = "add", value_name = "LABEL")]
    pub add: Vec<String>,

    /// Label to remove from every selected entry (can repeat)
    #[arg(short = 'r', long = "remove", value_name = "LABEL")]
    pub remove: Vec<String>,
}

impl IntentArgs {
    #[must_use]
    pub fn to_intent(&self) -> PendingIntent {
        PendingIntent::from_lists(&self.add, &self.remove)
    }

    /// Labels given to both `--add` and `--remove`
    #[must_use]
    pub fn conflicts(&self) -> Vec<&str> {
        self.add
            .iter()
            .filter(|label| self.remove.contains(*label))
            .map(String::as_str)
            .collect()
    }
}

/// Arguments for the apply command
#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub fragments: FragmentArgs,

    #[command(flatten)]
    pub intent: IntentArgs,

    /// Show what would change without writing anything
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Do not remember these fragments for next time
    #[arg(long = "no-save-prefs")]
    pub no_save_prefs: bool,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "addressor")]
#[command(about = "Bulk address renaming and label toggling for asset catalogs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase diagnostic logging (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub db_args: DbArgs,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rename and relabel the selected entries
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Fill in fragments and labels interactively, then apply
    #[command(visible_alias = "w")]
    Wizard {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Manage addressable entries
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },

    /// Manage known assets
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },

    /// Manage the label vocabulary
    Labels {
        #[command(subcommand)]
        command: LabelsCommands,
    },

    /// Show or reset remembered fragments
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },

    /// Show catalog counts and revision
    Status,

    /// Manage catalogs
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Entry subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum EntryCommands {
    /// Mark an asset as addressable
    Add {
        /// Asset id
        id: String,

        /// Asset path; registers the asset if it is not known yet
        #[arg(short = 'p', long = "path", value_name = "PATH")]
        path: Option<PathBuf>,

        /// Initial address (defaults to the asset path)
        #[arg(long = "address", value_name = "ADDRESS")]
        address: Option<String>,
    },

    /// Remove an entry; the asset stays known
    #[command(visible_alias = "rm")]
    Remove {
        /// Asset id
        id: String,
    },

    /// Show one entry
    Show {
        /// Asset id
        id: String,
    },

    /// List all entries
    #[command(visible_alias = "ls")]
    List {
        /// Print entries as JSON
        #[arg(long = "json")]
        json: bool,
    },
}

/// Asset subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AssetCommands {
    /// Register a known asset without making it addressable
    Add {
        /// Asset id
        id: String,

        /// Asset path
        path: PathBuf,
    },

    /// List known assets
    #[command(visible_alias = "ls")]
    List,
}

/// Label vocabulary subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LabelsCommands {
    /// List labels with usage counts
    #[command(visible_alias = "ls")]
    List,

    /// Define a new label
    Add {
        /// Label to define
        label: String,
    },

    /// Delete a label and strip it from every entry
    #[command(visible_alias = "rm")]
    Remove {
        /// Label to delete
        label: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// Preference subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsCommands {
    /// Show remembered fragments
    Show,

    /// Forget remembered fragments
    Reset,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., quiet)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Catalog management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DbCommands {
    /// Add a new catalog
    Add {
        /// Name of the catalog
        name: String,

        /// Path to the catalog directory
        path: PathBuf,
    },

    /// List all catalogs
    List,

    /// Remove a catalog from configuration
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the catalog to remove
        name: String,

        /// Also delete catalog files from disk
        #[arg(short = 'd', long = "delete-files")]
        delete_files: bool,
    },

    /// Set the default catalog
    #[command(name = "set-default")]
    SetDefault {
        /// Name of the catalog to set as default
        name: String,
    },
}
