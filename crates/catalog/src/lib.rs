// crates/catalog/src/lib.rs
//! Remote catalog access: paginated library fetch, validation, retrying scan
//!
//! The storefront client library (authentication, token refresh, endpoint
//! selection) is an external collaborator; this crate depends on it only
//! through the [`CatalogClient`] trait. On top of that trait it provides:
//! - [`LibraryFetcher`]: exhausts all result pages and strips episode-group
//!   placeholder records
//! - [`ValidatorChain`]: runs every registered validator and aggregates all
//!   defects into one failure
//! - [`LibraryScanner`]: retries the whole fetch-and-validate unit under an
//!   injected [`RetryPolicy`](shelfsync_resilience::RetryPolicy)

mod client;
mod error;
mod fetcher;
mod scan;
mod validate;

pub use client::{CatalogClient, LibraryPage, ResponseGroups};
pub use error::{CatalogError, ClientError};
pub use fetcher::{LibraryFetcher, DEFAULT_PAGE_SIZE};
pub use scan::{LibraryScanner, ScanError};
pub use validate::{
    AuthorsValidator, DuplicateProductIdValidator, EpisodeParentValidator, ItemValidator,
    TitleValidator, ValidationDefect, ValidationReport, ValidatorChain,
};
