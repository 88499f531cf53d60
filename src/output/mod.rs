//! Output formatting for CLI display
//!
//! This module provides utilities for formatting entries, assets, labels and
//! pending intent in the CLI.

use crate::CatalogEntry;
use crate::labels::{LabelIntent, PendingIntent};
use colored::Colorize;
use std::path::Path;

/// Format an entry with its address and labels
#[must_use]
pub fn entry_line(entry: &CatalogEntry, quiet: bool) -> String {
    if quiet {
        return entry.address.clone();
    }
    let labels = if entry.labels.is_empty() {
        "(no labels)".dimmed().to_string()
    } else {
        format!("[{}]", entry.labels.iter().cloned().collect::<Vec<_>>().join(", "))
    };
    format!(
        "  {} {} {} {}",
        entry.id.dimmed(),
        entry.address.cyan(),
        entry.asset_path.display(),
        labels
    )
}

/// Format a known asset, marking whether it is addressable
#[must_use]
pub fn asset_line(id: &str, path: &Path, addressable: bool, quiet: bool) -> String {
    if quiet {
        return id.to_string();
    }
    let marker = if addressable {
        "●".green().to_string()
    } else {
        "○".dimmed().to_string()
    };
    format!("  {marker} {} {}", id.dimmed(), path.display())
}

/// Format a label with usage count
#[must_use]
pub fn label_with_count(label: &str, count: usize, quiet: bool) -> String {
    if quiet {
        label.to_string()
    } else {
        format!("  {label} (used by {count} entr{})", if count == 1 { "y" } else { "ies" })
    }
}

/// One row of the two-control label form, e.g. `[+] beta [ ]`
#[must_use]
pub fn intent_row(label: &str, intent: LabelIntent) -> String {
    let add = if intent == LabelIntent::Add { "+".green().to_string() } else { " ".to_string() };
    let remove = if intent == LabelIntent::Remove { "-".red().to_string() } else { " ".to_string() };
    format!("  [{add}] {label} [{remove}]")
}

/// Short description of pending label changes, e.g. `+beta -old`
#[must_use]
pub fn intent_summary(intent: &PendingIntent) -> String {
    if intent.is_empty() {
        return "no label changes".to_string();
    }
    intent
        .iter()
        .map(|(label, state)| format!("{}{label}", state.marker()))
        .collect::<Vec<_>>()
        .join(" ")
}
