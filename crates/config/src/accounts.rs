//! Configured storefront accounts
//!
//! Credentials and identity tokens are the storefront client's concern;
//! this file only binds usernames to locales so scans know which accounts
//! to walk.

use crate::error::ConfigResult;
use crate::persistence::{load_toml, save_toml};
use serde::{Deserialize, Serialize};
use shelfsync_core::Account;
use std::path::Path;

/// One configured account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub username: String,
    pub locale: String,
}

/// The accounts file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsFile {
    pub accounts: Vec<AccountEntry>,
}

impl AccountsFile {
    /// Loads the accounts file, empty when missing
    pub fn load(path: &Path) -> ConfigResult<Self> {
        load_toml(path)
    }

    /// Saves the accounts file atomically
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        save_toml(path, self)
    }

    /// Adds an account unless the identical binding is already present
    pub fn add(&mut self, username: impl Into<String>, locale: impl Into<String>) -> bool {
        let entry = AccountEntry {
            username: username.into(),
            locale: locale.into(),
        };
        if self.accounts.contains(&entry) {
            return false;
        }
        self.accounts.push(entry);
        true
    }

    /// The configured accounts as domain values
    pub fn to_accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|e| Account::new(e.username.clone(), e.locale.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
