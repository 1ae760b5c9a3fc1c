// crates/reconcile/src/reconciler.rs
//! Multi-account reconciliation driver

use crate::confirm::RemovalGate;
use crate::detect::find_inactive_books;
use crate::error::{ReconcileError, ReconcileResult};
use crate::import::{import_new_items, ImportOutcome};
use chrono::{DateTime, Utc};
use log::{info, warn};
use shelfsync_catalog::{CatalogClient, LibraryScanner};
use shelfsync_core::{Account, LibraryBook, ProductId};
use shelfsync_database::queries::library::{list_library_books_for_account, remove_library_books};
use shelfsync_database::DbPool;
use std::collections::HashSet;
use uuid::Uuid;

/// What one account's scan produced
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Size of the validated remote set
    pub total_remote: usize,
    /// Newly imported books
    pub imported: usize,
    /// Locally tracked books absent from the remote set
    pub candidates: Vec<LibraryBook>,
}

/// Per-account result of a reconciliation pass
#[derive(Debug)]
pub struct AccountOutcome {
    pub account: Account,
    pub result: ReconcileResult<ScanSummary>,
}

/// Record of one whole reconciliation pass
#[derive(Debug)]
pub struct ReconcileReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<AccountOutcome>,
    /// Books actually removed after confirmation
    pub removed: u64,
}

impl ReconcileReport {
    /// Total removal candidates across successfully scanned accounts
    pub fn candidate_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.candidates.len())
            .sum()
    }

    /// Accounts whose scan cycle failed
    pub fn failed_accounts(&self) -> Vec<&Account> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| &o.account)
            .collect()
    }
}

/// Drives scan, import, inactive detection, confirmation and removal
///
/// Accounts are processed sequentially; each account's fetch, validation and
/// detection touch disjoint local-record subsets, so a failure in one is
/// recorded in its outcome and the remaining accounts continue. The approved
/// batch is removed in a single atomic store operation after every account
/// has been confirmed.
pub struct Reconciler {
    scanner: LibraryScanner,
    pool: DbPool,
}

impl Reconciler {
    /// Creates a reconciler over an open library store
    pub fn new(scanner: LibraryScanner, pool: DbPool) -> Self {
        Self { scanner, pool }
    }

    /// Scans one account: validated fetch, import, inactive detection
    pub async fn scan_account(
        &self,
        client: &dyn CatalogClient,
        account: &Account,
    ) -> ReconcileResult<ScanSummary> {
        let items = self.scanner.scan(client, account).await?;

        let ImportOutcome {
            total_remote,
            imported,
        } = import_new_items(&self.pool, account, &items).await?;

        // Snapshot the account's local records after import so freshly
        // imported books can never appear as removal candidates.
        let local = list_library_books_for_account(&self.pool, account).await?;
        let candidates = find_inactive_books(&items, &local, account);

        if !candidates.is_empty() {
            info!(
                "{} inactive candidate(s) for {}: no longer listed remotely",
                candidates.len(),
                account
            );
        }

        Ok(ScanSummary {
            total_remote,
            imported,
            candidates,
        })
    }

    /// Scans every account, recording per-account outcomes
    pub async fn scan_accounts(
        &self,
        client: &dyn CatalogClient,
        accounts: &[Account],
    ) -> Vec<AccountOutcome> {
        let mut outcomes = Vec::with_capacity(accounts.len());

        for account in accounts {
            let result = self.scan_account(client, account).await;
            if let Err(err) = &result {
                warn!("reconciliation failed for {}: {}", account, err);
            }
            outcomes.push(AccountOutcome {
                account: account.clone(),
                result,
            });
        }

        outcomes
    }

    /// Removes an approved batch from the store, atomically
    pub async fn remove_approved(&self, approved: &[LibraryBook]) -> ReconcileResult<u64> {
        let ids: Vec<ProductId> = approved.iter().map(|lb| lb.product_id().clone()).collect();
        remove_library_books(&self.pool, &ids)
            .await
            .map_err(|source| ReconcileError::Removal {
                source,
                candidates: approved.to_vec(),
            })
    }

    /// Runs a full reconciliation pass over the given accounts
    ///
    /// Candidates are presented to the gate per account; only what the gate
    /// returns (intersected with the actual candidate set) is deleted, in
    /// one atomic batch. When removal fails the store is untouched and the
    /// approved candidates travel with the error.
    pub async fn reconcile(
        &self,
        client: &dyn CatalogClient,
        accounts: &[Account],
        gate: &dyn RemovalGate,
    ) -> ReconcileResult<ReconcileReport> {
        let started_at = Utc::now();
        let outcomes = self.scan_accounts(client, accounts).await;

        let mut approved_batch: Vec<LibraryBook> = Vec::new();
        for outcome in &outcomes {
            let summary = match &outcome.result {
                Ok(summary) if !summary.candidates.is_empty() => summary,
                _ => continue,
            };

            let approved = gate.confirm(&outcome.account, &summary.candidates).await;
            let candidate_ids: HashSet<&ProductId> =
                summary.candidates.iter().map(|lb| lb.product_id()).collect();
            approved_batch.extend(
                approved
                    .into_iter()
                    .filter(|lb| candidate_ids.contains(lb.product_id())),
            );
        }

        let removed = if approved_batch.is_empty() {
            0
        } else {
            self.remove_approved(&approved_batch).await?
        };

        Ok(ReconcileReport {
            id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
            removed,
        })
    }
}
