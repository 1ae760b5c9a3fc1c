//! Account identity used for fetch provenance
//!
//! The username is sensitive: Display and log output always go through the
//! masked form. Use [`Account::username`] only where the real login is needed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A credential/locale binding that owns a subset of the local library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    username: String,
    locale: String,
}

impl Account {
    /// Creates an account identity
    pub fn new(username: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            locale: locale.into(),
        }
    }

    /// The real login name; do not log this
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The storefront locale (e.g. "us", "uk", "de")
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Masked login safe for logs and terminal output
    pub fn masked_username(&self) -> String {
        let mut chars = self.username.chars();
        match (chars.next(), self.username.chars().last()) {
            (Some(first), Some(last)) if self.username.chars().count() > 2 => {
                format!("{}***{}", first, last)
            }
            _ => "***".to_string(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.masked_username(), self.locale)
    }
}
