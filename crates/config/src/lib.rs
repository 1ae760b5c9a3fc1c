//! Configuration for shelfsync
//!
//! Two TOML files under the platform config directory:
//! - `settings.toml` - application settings ([`AppSettings`])
//! - `accounts.toml` - the storefront accounts to scan ([`AccountsFile`])
//!
//! Both are written atomically (temp file + rename) so a crash mid-write
//! never leaves a truncated file behind. Missing files yield defaults.

mod accounts;
mod error;
mod persistence;
mod settings;

pub use accounts::{AccountEntry, AccountsFile};
pub use error::{ConfigError, ConfigResult};
pub use settings::AppSettings;

use std::path::PathBuf;

/// Platform config directory for shelfsync, when one can be determined
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "shelfsync")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default path of the settings file
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.toml"))
}

/// Default path of the accounts file
pub fn accounts_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("accounts.toml"))
}
