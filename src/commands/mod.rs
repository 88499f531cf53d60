//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the catalog.

pub mod apply;
pub mod asset;
pub mod catalogs;
pub mod entry;
pub mod labels;
pub mod prefs;
pub mod status;
pub mod wizard;

// Re-export execute functions for convenience
pub use apply::execute as apply;
pub use asset::execute as asset;
pub use catalogs::execute as catalogs;
pub use entry::execute as entry;
pub use labels::execute as labels;
pub use prefs::execute as prefs;
pub use status::execute as status;
pub use wizard::execute as wizard;

use tracing::debug;

use crate::{AddressorError, config::AddressorConfig, db::Database};

/// Open the named catalog, or the default one
///
/// # Errors
/// Returns an error if no catalog is named and none is the default, the name
/// is not configured, or the catalog cannot be opened.
pub fn open_catalog(config: &AddressorConfig, name: Option<&str>) -> Result<Database, AddressorError> {
    let path = config.resolve_catalog(name)?;
    debug!(path = %path.display(), "opening catalog");
    Ok(Database::open(path)?)
}
