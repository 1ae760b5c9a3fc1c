// crates/catalog/src/client.rs
//! The narrow capability this crate requires from the storefront client

use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelfsync_core::{Account, Item};

/// Which optional sub-resources a library listing should include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseGroups {
    pub series: bool,
    pub categories: bool,
    pub rating: bool,
    pub relationships: bool,
    pub pdf: bool,
}

impl ResponseGroups {
    /// Every optional sub-resource included
    pub fn all() -> Self {
        Self {
            series: true,
            categories: true,
            rating: true,
            relationships: true,
            pdf: true,
        }
    }

    /// Bibliographic fields only
    pub fn minimal() -> Self {
        Self {
            series: false,
            categories: false,
            rating: false,
            relationships: false,
            pdf: false,
        }
    }
}

impl Default for ResponseGroups {
    fn default() -> Self {
        Self::all()
    }
}

/// One page of a library listing
#[derive(Debug, Clone)]
pub struct LibraryPage {
    pub items: Vec<Item>,
    pub has_more: bool,
}

impl LibraryPage {
    /// A terminal empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }
}

/// Capability to fetch one page of an account's purchased library
///
/// Authentication, token refresh and locale-specific endpoint selection are
/// the implementing client library's responsibility. Page numbers start at 1.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_library_page(
        &self,
        account: &Account,
        page_number: u32,
        page_size: u32,
        response_groups: &ResponseGroups,
    ) -> Result<LibraryPage, ClientError>;
}
