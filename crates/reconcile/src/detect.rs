// crates/reconcile/src/detect.rs
//! Inactive book detection

use shelfsync_core::{Account, Item, LibraryBook, ProductId};
use std::collections::HashSet;

/// Finds locally tracked books that are absent from the account's remote set
///
/// Input (a) must be a validated item set; callers never run detection
/// against a retry-exhausted or defect-flagged fetch. Input (b) may be the
/// whole local library: only books carrying this account's provenance are
/// considered, so one account's remote set can never mark another account's
/// books inactive. Matching is exact, case-sensitive product-id equality.
///
/// Pure: no side effects, identical output for identical input, and an empty
/// result is a normal outcome.
pub fn find_inactive_books(
    remote_items: &[Item],
    local_books: &[LibraryBook],
    account: &Account,
) -> Vec<LibraryBook> {
    let remote_ids: HashSet<&ProductId> = remote_items.iter().map(|i| &i.product_id).collect();

    local_books
        .iter()
        .filter(|lb| lb.account == *account)
        .filter(|lb| !remote_ids.contains(lb.product_id()))
        .cloned()
        .collect()
}
