// FILE: crates/cli/src/snapshot.rs
//! Catalog client backed by a library snapshot file
//!
//! Authentication and transport belong to the storefront client library; the
//! CLI consumes that client's exported library snapshot instead. The snapshot
//! is a JSON document with one item list per account, and this adapter serves
//! it through the same paginated [`CatalogClient`] capability a live client
//! would implement.

use async_trait::async_trait;
use serde::Deserialize;
use shelfsync_catalog::{CatalogClient, ClientError, LibraryPage, ResponseGroups};
use shelfsync_core::{Account, Item};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SnapshotAccount {
    username: String,
    locale: String,
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    accounts: Vec<SnapshotAccount>,
}

/// Serves library pages from a snapshot file
pub struct SnapshotClient {
    libraries: HashMap<Account, Vec<Item>>,
}

impl SnapshotClient {
    /// Loads a snapshot file
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::transport("failed to read snapshot file", e))?;
        let snapshot: SnapshotFile = serde_json::from_str(&contents)
            .map_err(|e| ClientError::Protocol(format!("invalid snapshot file: {}", e)))?;

        let libraries = snapshot
            .accounts
            .into_iter()
            .map(|a| (Account::new(a.username, a.locale), a.items))
            .collect();

        Ok(Self { libraries })
    }

    /// Accounts present in the snapshot
    pub fn account_count(&self) -> usize {
        self.libraries.len()
    }
}

#[async_trait]
impl CatalogClient for SnapshotClient {
    async fn fetch_library_page(
        &self,
        account: &Account,
        page_number: u32,
        page_size: u32,
        _response_groups: &ResponseGroups,
    ) -> Result<LibraryPage, ClientError> {
        // A missing account must fail the scan, not read as an empty
        // library: an empty page would flag every local book inactive.
        let items = self.libraries.get(account).ok_or_else(|| {
            ClientError::Auth(format!("account {} not present in snapshot", account))
        })?;

        let start = (page_number.saturating_sub(1) as usize) * page_size as usize;
        let end = (start + page_size as usize).min(items.len());
        let page_items = if start < items.len() {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        Ok(LibraryPage {
            items: page_items,
            has_more: end < items.len(),
        })
    }
}
