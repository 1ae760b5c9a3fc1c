// crates/reconcile/src/confirm.rs
//! Operator confirmation of removal candidates

use async_trait::async_trait;
use shelfsync_core::{Account, LibraryBook};

/// Human-in-the-loop approval of removal candidates
///
/// The reconciler presents each account's candidate set through this trait
/// and deletes only what comes back. Returning an empty set is a normal
/// outcome and leaves the store untouched. The interactive implementation
/// lives in the application binary; headless implementations keep the
/// reconciliation flow fully testable.
#[async_trait]
pub trait RemovalGate: Send + Sync {
    /// Returns the operator-approved subset of `candidates`
    async fn confirm(&self, account: &Account, candidates: &[LibraryBook]) -> Vec<LibraryBook>;
}

/// Approves every candidate; used by non-interactive runs
pub struct ApproveAll;

#[async_trait]
impl RemovalGate for ApproveAll {
    async fn confirm(&self, _account: &Account, candidates: &[LibraryBook]) -> Vec<LibraryBook> {
        candidates.to_vec()
    }
}

/// Declines every candidate
pub struct ApproveNone;

#[async_trait]
impl RemovalGate for ApproveNone {
    async fn confirm(&self, _account: &Account, _candidates: &[LibraryBook]) -> Vec<LibraryBook> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfsync_core::{Item, ProductId};

    fn candidates() -> Vec<LibraryBook> {
        let account = Account::new("reader@example.com", "us");
        ["B001", "B002"]
            .iter()
            .map(|id| {
                LibraryBook::from_item(&Item::new(ProductId::new(*id), "Some Title"), account.clone())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_approve_all_returns_every_candidate() {
        let account = Account::new("reader@example.com", "us");
        let candidates = candidates();
        let approved = ApproveAll.confirm(&account, &candidates).await;
        assert_eq!(approved, candidates);
    }

    #[tokio::test]
    async fn test_approve_none_returns_nothing() {
        let account = Account::new("reader@example.com", "us");
        let approved = ApproveNone.confirm(&account, &candidates()).await;
        assert!(approved.is_empty());
    }
}
