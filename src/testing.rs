//! Testing utilities for addressor
//!
//! This module provides a `TestDb` wrapper for temporary catalog management.
//!
//! Only available when compiled with `cfg(test)`.

use std::path::Path;

use tempfile::TempDir;

use crate::db::Database;

/// Wrapper for a temporary sled catalog that cleans up on drop
///
/// The catalog lives in its own temporary directory, so tests can run in
/// parallel without sharing state.
pub struct TestDb {
    // Dropped before `dir` so sled flushes into a directory that still exists
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create an empty catalog in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("catalog")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get a mutable reference to the underlying database
    pub const fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Directory holding the catalog
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_basic() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count(), 0);
        assert!(test_db.path().join("catalog").exists());
    }

    #[test]
    fn test_db_cleanup() {
        let path = {
            let test_db = TestDb::new();
            test_db.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
