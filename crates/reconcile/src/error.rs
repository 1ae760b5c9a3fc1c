// crates/reconcile/src/error.rs
//! Error types for reconciliation

use shelfsync_catalog::ScanError;
use shelfsync_core::{AppError, LibraryBook};
use thiserror::Error;

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors that can occur during a reconciliation pass
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The account's fetch cycle exhausted its retry budget
    #[error("Library scan failed: {0}")]
    Scan(#[from] ScanError),

    /// The persisted store failed
    #[error("Library store error: {0}")]
    Store(#[from] AppError),

    /// Deleting the approved batch failed; the store was left untouched and
    /// the candidates are carried here for a future retry
    #[error("Removal of {} approved book(s) failed: {source}", .candidates.len())]
    Removal {
        #[source]
        source: AppError,
        candidates: Vec<LibraryBook>,
    },
}
