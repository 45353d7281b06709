//! Provider configuration.
//!
//! # Responsibility
//! - Describe where the shelter database lives and which authority it serves.
//! - Carry optional logging settings for `init_logging`.
//!
//! # Invariants
//! - A validated config never yields a relative storage or log directory.
//! - `db_file_name` is a bare file name, never a path.

use crate::model::pet::CONTENT_AUTHORITY;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default database file name inside `data_dir`.
pub const DEFAULT_DB_FILE_NAME: &str = "shelter.db";

/// Where the provider keeps its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    InMemory,
    File(PathBuf),
}

/// Configuration rejected by `ShelterConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyAuthority,
    EmptyDbFileName,
    DbFileNameNotBare(String),
    RelativeDirectory { field: &'static str, path: PathBuf },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthority => write!(f, "authority cannot be empty"),
            Self::EmptyDbFileName => write!(f, "db_file_name cannot be empty"),
            Self::DbFileNameNotBare(name) => {
                write!(f, "db_file_name must be a bare file name, got `{name}`")
            }
            Self::RelativeDirectory { field, path } => write!(
                f,
                "{field} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Shelter provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelterConfig {
    /// Directory holding the database file. `None` keeps the table in memory.
    pub data_dir: Option<PathBuf>,
    pub db_file_name: String,
    /// Authority the router accepts in locators.
    pub authority: String,
    /// Falls back to `default_log_level()` when unset.
    pub log_level: Option<String>,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ShelterConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            authority: CONTENT_AUTHORITY.to_string(),
            log_level: None,
            log_dir: None,
        }
    }
}

impl ShelterConfig {
    /// Config for an on-disk database under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.trim().is_empty() {
            return Err(ConfigError::EmptyAuthority);
        }

        let file_name = self.db_file_name.trim();
        if file_name.is_empty() {
            return Err(ConfigError::EmptyDbFileName);
        }
        if Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
            return Err(ConfigError::DbFileNameNotBare(self.db_file_name.clone()));
        }

        require_absolute("data_dir", self.data_dir.as_deref())?;
        require_absolute("log_dir", self.log_dir.as_deref())?;
        Ok(())
    }

    pub fn storage_location(&self) -> StorageLocation {
        match &self.data_dir {
            Some(dir) => StorageLocation::File(dir.join(self.db_file_name.trim())),
            None => StorageLocation::InMemory,
        }
    }
}

fn require_absolute(field: &'static str, path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) if !path.is_absolute() => Err(ConfigError::RelativeDirectory {
            field,
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ShelterConfig, StorageLocation};
    use std::path::PathBuf;

    #[test]
    fn default_config_is_in_memory_and_valid() {
        let config = ShelterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.storage_location(), StorageLocation::InMemory);
        assert_eq!(config.authority, "com.example.android.pets");
    }

    #[test]
    fn data_dir_resolves_file_location() {
        let dir = std::env::temp_dir();
        let config = ShelterConfig::with_data_dir(&dir);
        assert_eq!(
            config.storage_location(),
            StorageLocation::File(dir.join("shelter.db"))
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ShelterConfig::default();
        config.db_file_name = "nested/shelter.db".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DbFileNameNotBare(_))
        ));

        let mut config = ShelterConfig::default();
        config.data_dir = Some(PathBuf::from("relative/dir"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RelativeDirectory {
                field: "data_dir",
                ..
            })
        ));

        let mut config = ShelterConfig::default();
        config.authority = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyAuthority));
    }
}
