//! Application settings

use crate::error::ConfigResult;
use crate::persistence::{load_toml, save_toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Library database file path
    pub database_path: PathBuf,

    /// Items requested per library listing page
    pub page_size: u32,

    /// Attempt budget for one fetch-and-validate cycle (including the first)
    pub fetch_attempts: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("shelfsync.db"),
            page_size: 100,
            fetch_attempts: 3,
        }
    }
}

impl AppSettings {
    /// Loads settings, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> ConfigResult<Self> {
        load_toml(path)
    }

    /// Saves settings atomically
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        save_toml(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.page_size, 100);
        assert_eq!(settings.fetch_attempts, 3);
        assert_eq!(settings.database_path, PathBuf::from("shelfsync.db"));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = AppSettings {
            database_path: PathBuf::from("/data/library.db"),
            page_size: 50,
            fetch_attempts: 5,
        };
        settings.save(&path).unwrap();

        assert_eq!(AppSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "page_size = 25\n").unwrap();

        let settings = AppSettings::load(&path).unwrap();
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.fetch_attempts, 3);
    }
}
