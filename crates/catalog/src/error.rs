// crates/catalog/src/error.rs
//! Error types for catalog operations

use crate::validate::ValidationReport;
use thiserror::Error;

/// Errors produced by a [`CatalogClient`](crate::CatalogClient) implementation
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure reaching the listing endpoint
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The endpoint answered but the payload could not be understood
    #[error("Malformed response: {0}")]
    Protocol(String),

    /// The client could not authenticate the account
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl ClientError {
    /// Helper to create a transport error from any error type
    pub fn transport<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A failure of one fetch-and-validate cycle
///
/// Both variants are transient from the scanner's point of view and eligible
/// for retry; only after the attempt budget is exhausted does one of these
/// become the cycle's fatal error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The underlying page fetch failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The fetched collection failed validation; carries every defect
    #[error(transparent)]
    Validation(#[from] ValidationReport),
}
