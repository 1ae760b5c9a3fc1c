// crates/reconcile/src/lib.rs
//! Library reconciliation
//!
//! Diffs the validated remote item set for each configured account against
//! the locally persisted library: newly purchased items are imported, and
//! locally tracked books that no longer appear remotely become removal
//! candidates. Candidates are only ever deleted after passing through an
//! injected [`RemovalGate`] - the core never auto-deletes.
//!
//! Per-account pipelines are independent: a fatal scan failure for one
//! account is recorded in that account's outcome and the remaining accounts
//! continue processing.

mod confirm;
mod detect;
mod error;
mod import;
mod reconciler;

pub use confirm::{ApproveAll, ApproveNone, RemovalGate};
pub use detect::find_inactive_books;
pub use error::{ReconcileError, ReconcileResult};
pub use import::{import_new_items, ImportOutcome};
pub use reconciler::{AccountOutcome, ReconcileReport, Reconciler, ScanSummary};
