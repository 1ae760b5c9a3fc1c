//! Atomic TOML file persistence

use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Loads a TOML file, returning `Default` when the file does not exist
pub(crate) fn load_toml<T>(path: &Path) -> ConfigResult<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("config file not found at {}, using defaults", path.display());
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    // An empty file is corruption, not a valid default
    if contents.trim().is_empty() {
        return Err(ConfigError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "config file is empty"),
        });
    }

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a TOML file atomically: temp file in the same directory, then rename
pub(crate) fn save_toml<T>(path: &Path, value: &T) -> ConfigResult<()>
where
    T: Serialize,
{
    let contents = toml::to_string_pretty(value)?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    temp.persist(path).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
