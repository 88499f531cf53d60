//! Batch apply
//!
//! Runs a rename and the pending label intent across a selection:
//! - `report`: per-item outcomes and the printed summary
//!
//! Identifiers that do not resolve to an addressable entry are reported and
//! skipped; the rest of the batch still runs. Changed entries reach the
//! catalog in one batched notification.

mod report;

pub use report::{ApplyReport, Renamed, UnresolvedEntry};

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::CatalogEntry;
use crate::catalog::{CatalogError, CatalogStore, Entry};
use crate::compose::{AssetNames, FragmentSet};
use crate::labels::{PendingIntent, apply_intent};

/// Errors that stop a batch
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Nothing selected; the apply action is blocked
    #[error("Select at least one asset.")]
    EmptySelection,

    /// Catalog read or write failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

type Result<T> = std::result::Result<T, ApplyError>;

/// Rename and relabel every selected entry, then notify the catalog once
///
/// # Errors
///
/// Returns `ApplyError::EmptySelection` for an empty selection and
/// `ApplyError::Catalog` if the catalog cannot be read or written. Unresolved
/// identifiers are not errors; they are listed in the report.
pub fn apply_all<C: CatalogStore + ?Sized>(
    selection: &[String],
    fragments: &FragmentSet,
    intent: &PendingIntent,
    catalog: &mut C,
) -> Result<ApplyReport> {
    let (changed, mut report) = stage(selection, fragments, intent, catalog)?;
    if !changed.is_empty() {
        let events = catalog.notify_entries_changed(&changed, true)?;
        report.revision = events.last().map(|event| event.revision);
    }
    Ok(report)
}

/// Compute what [`apply_all`] would do without touching the catalog
///
/// # Errors
///
/// Same as [`apply_all`], minus write failures.
pub fn preview_all<C: CatalogStore + ?Sized>(
    selection: &[String],
    fragments: &FragmentSet,
    intent: &PendingIntent,
    catalog: &C,
) -> Result<ApplyReport> {
    stage(selection, fragments, intent, catalog).map(|(_, report)| report)
}

fn stage<C: CatalogStore + ?Sized>(
    selection: &[String],
    fragments: &FragmentSet,
    intent: &PendingIntent,
    catalog: &C,
) -> Result<(Vec<CatalogEntry>, ApplyReport)> {
    if selection.is_empty() {
        return Err(ApplyError::EmptySelection);
    }

    let mut seen = HashSet::with_capacity(selection.len());
    let mut changed = Vec::with_capacity(selection.len());
    let mut report = ApplyReport::default();

    for id in selection {
        // Repeated ids would only write the same result twice
        if !seen.insert(id.as_str()) {
            continue;
        }

        let Some(mut entry) = catalog.find_entry(id)? else {
            let unresolved = UnresolvedEntry {
                id: id.clone(),
                asset_path: catalog.resolve_path(id)?,
            };
            warn!("{unresolved}");
            report.unresolved.push(unresolved);
            continue;
        };

        let names = AssetNames::from_path(entry.asset_path());
        let address = fragments.compose(&names.base_name, &names.folder_name);
        let previous = entry.address.clone();
        entry.set_address(address.clone());
        let labels_changed = apply_intent(&mut entry, intent);
        debug!(id = %id, from = %previous, to = %address, labels_changed, "staged entry");

        report.renamed.push(Renamed {
            id: id.clone(),
            previous,
            address,
            labels_changed,
        });
        changed.push(entry);
    }

    Ok((changed, report))
}

#[cfg(test)]
mod tests;
