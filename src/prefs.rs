//! Last-used fragment values
//!
//! A small TOML file next to the main config remembers the fragments of the
//! previous apply so the next one starts from them:
//!
//! ```toml
//! prefix0 = "env"
//! prefix1 = ""
//! prefix2 = "ui"
//! postfix0 = ""
//! prepend_folder_name = true
//! ```
//!
//! Nothing in the rename logic reads this file; the commands load it for
//! defaults and write it back when a batch is applied.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};

use crate::compose::FragmentSet;
use crate::config::AddressorConfig;

/// Preference file holding a [`FragmentSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    /// Preferences at the default location in the user's config directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined.
    pub fn locate() -> Result<Self, ConfigError> {
        Ok(Self::at(AddressorConfig::config_dir()?.join("prefs.toml")))
    }

    /// Preferences stored at an explicit path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored fragments; a missing file yields empty fragments
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load(&self) -> Result<FragmentSet, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Store fragments
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, fragments: &FragmentSet) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }
        let toml_string = toml::to_string_pretty(fragments)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize preferences: {e}")))?;
        fs::write(&self.path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write preferences: {e}")))?;
        Ok(())
    }

    /// Forget stored fragments; returns whether a file was removed
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be removed.
    pub fn reset(&self) -> Result<bool, ConfigError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .map_err(|e| ConfigError::Message(format!("Failed to remove preferences: {e}")))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::at(dir.path().join("prefs.toml"));
        assert_eq!(prefs.load().unwrap(), FragmentSet::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::at(dir.path().join("sub").join("prefs.toml"));
        let fragments = FragmentSet {
            prefix0: "env".into(),
            prefix2: "ui".into(),
            postfix0: "hd".into(),
            prepend_folder_name: true,
            ..FragmentSet::default()
        };

        prefs.save(&fragments).unwrap();
        assert_eq!(prefs.load().unwrap(), fragments);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "prefix1 = \"core\"\n").unwrap();

        let fragments = Preferences::at(&path).load().unwrap();
        assert_eq!(fragments.prefix1, "core");
        assert!(fragments.prefix0.is_empty());
        assert!(!fragments.prepend_folder_name);
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::at(dir.path().join("prefs.toml"));
        assert!(!prefs.reset().unwrap());

        prefs.save(&FragmentSet::default()).unwrap();
        assert!(prefs.reset().unwrap());
        assert!(!prefs.path().exists());
    }
}
