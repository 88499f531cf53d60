//! Configuration module for addressor
//!
//! Manages application configuration including catalog paths.
//! Configuration is stored in the user's config directory.

mod setup;

pub use setup::first_time_setup;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "addressor";

const fn default_confirm() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AddressorConfig {
    /// Map of catalog names to their sled directories
    #[serde(default)]
    pub catalogs: HashMap<String, PathBuf>,

    /// The catalog to use when none is specified
    #[serde(default)]
    pub default_catalog: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Ask for confirmation before applying a batch
    #[serde(default = "default_confirm")]
    pub confirm: bool,
}

impl Default for AddressorConfig {
    fn default() -> Self {
        Self {
            catalogs: HashMap::new(),
            default_catalog: None,
            quiet: false,
            confirm: default_confirm(),
        }
    }
}

impl AddressorConfig {
    /// Directory holding the config and preference files
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR))
    }

    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory new catalogs are created in when given a bare name
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR))
    }

    /// Where a catalog given on the command line lives
    ///
    /// A bare name such as `main` is placed under [`Self::data_dir`]; any
    /// other path is used as given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a bare name is given and the system data
    /// directory cannot be determined.
    pub fn catalog_location(path: &Path) -> Result<PathBuf, ConfigError> {
        if path.components().count() == 1 && !path.is_absolute() {
            Ok(Self::data_dir()?.join(path))
        } else {
            Ok(path.to_path_buf())
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Add a catalog to the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn add_catalog(&mut self, name: String, path: PathBuf) -> Result<(), ConfigError> {
        self.catalogs.insert(name, path);
        self.save()
    }

    /// Remove a catalog from the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn remove_catalog(&mut self, name: &str) -> Result<Option<PathBuf>, ConfigError> {
        let removed = self.catalogs.remove(name);
        if self.default_catalog.as_deref() == Some(name) {
            self.default_catalog = None;
        }
        self.save()?;
        Ok(removed)
    }

    /// Get a catalog path by name
    #[must_use]
    pub fn get_catalog(&self, name: &str) -> Option<&PathBuf> {
        self.catalogs.get(name)
    }

    /// List all catalog names, sorted
    #[must_use]
    pub fn list_catalogs(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.catalogs.keys().collect();
        names.sort();
        names
    }

    /// Set the default catalog
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog name doesn't exist in the configuration
    /// or if saving the configuration fails.
    pub fn set_default_catalog(&mut self, name: String) -> Result<(), ConfigError> {
        if !self.catalogs.contains_key(&name) {
            return Err(ConfigError::Message(format!(
                "Catalog '{name}' does not exist in configuration"
            )));
        }
        self.default_catalog = Some(name);
        self.save()
    }

    /// Get the default catalog name
    #[must_use]
    pub const fn get_default_catalog(&self) -> Option<&String> {
        self.default_catalog.as_ref()
    }

    /// Pick the catalog path for a command: the explicit name, else the default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no catalog is named and no default is set, or
    /// the named catalog is not configured.
    pub fn resolve_catalog(&self, name: Option<&str>) -> Result<&PathBuf, ConfigError> {
        let name = name
            .or(self.default_catalog.as_deref())
            .ok_or_else(|| {
                ConfigError::Message(
                    "No default catalog set. Use 'addressor db add <name> <path>' to create one, or specify --db <name>.".into(),
                )
            })?;
        self.get_catalog(name)
            .ok_or_else(|| ConfigError::Message(format!("Catalog '{name}' not found in configuration")))
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AddressorConfig::default();
        assert!(config.catalogs.is_empty());
        assert!(config.default_catalog.is_none());
        assert!(config.confirm);
    }

    #[test]
    fn test_list_catalogs_sorted() {
        let mut config = AddressorConfig::default();
        config.catalogs.insert("gamma".to_string(), PathBuf::from("/tmp/gamma"));
        config.catalogs.insert("alpha".to_string(), PathBuf::from("/tmp/alpha"));
        config.catalogs.insert("beta".to_string(), PathBuf::from("/tmp/beta"));

        assert_eq!(config.list_catalogs(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_resolve_catalog_prefers_explicit_name() {
        let mut config = AddressorConfig::default();
        config.catalogs.insert("main".to_string(), PathBuf::from("/tmp/main"));
        config.catalogs.insert("other".to_string(), PathBuf::from("/tmp/other"));
        config.default_catalog = Some("main".to_string());

        assert_eq!(config.resolve_catalog(None).unwrap(), &PathBuf::from("/tmp/main"));
        assert_eq!(
            config.resolve_catalog(Some("other")).unwrap(),
            &PathBuf::from("/tmp/other")
        );
        assert!(config.resolve_catalog(Some("missing")).is_err());
    }

    #[test]
    fn test_resolve_catalog_without_default() {
        let config = AddressorConfig::default();
        let err = config.resolve_catalog(None).unwrap_err();
        assert!(err.to_string().contains("No default catalog set"));
    }

    #[test]
    fn test_catalog_location_places_bare_names_in_data_dir() {
        let bare = AddressorConfig::catalog_location(Path::new("main")).unwrap();
        assert_eq!(bare, AddressorConfig::data_dir().unwrap().join("main"));

        let nested = AddressorConfig::catalog_location(Path::new("work/catalogs/main")).unwrap();
        assert_eq!(nested, PathBuf::from("work/catalogs/main"));

        let absolute = AddressorConfig::catalog_location(Path::new("/srv/catalog")).unwrap();
        assert_eq!(absolute, PathBuf::from("/srv/catalog"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AddressorConfig::default();
        config.catalogs.insert("main".to_string(), PathBuf::from("/tmp/main"));
        config.default_catalog = Some("main".to_string());
        config.confirm = false;
        config.save_to(&path).unwrap();

        let loaded = AddressorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = AddressorConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert!(loaded.confirm);
        assert!(loaded.catalogs.is_empty());
    }
}
