// crates/catalog/src/scan.rs
//! Retrying fetch-and-validate orchestration

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::fetcher::LibraryFetcher;
use crate::validate::ValidatorChain;
use log::{info, warn};
use shelfsync_core::{Account, Item};
use shelfsync_resilience::{with_retry, RetryError, RetryPolicy};

/// A scan cycle that exhausted its attempt budget; carries the final error
pub type ScanError = RetryError<CatalogError>;

/// Runs {fetch all pages, validate} as one retried unit per account
///
/// The storefront's first listing call after a long idle period can return
/// syntactically valid records with empty titles and authors; an identical
/// repeated call typically succeeds. The whole fetch-and-validate unit is
/// therefore retried on any failure, validation aggregates included, under
/// the injected policy. Either a fully validated item set comes back or the
/// cycle fails as a whole.
pub struct LibraryScanner {
    fetcher: LibraryFetcher,
    chain: ValidatorChain,
    policy: RetryPolicy,
}

impl LibraryScanner {
    /// Creates a scanner from explicit parts
    pub fn new(fetcher: LibraryFetcher, chain: ValidatorChain, policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            chain,
            policy,
        }
    }

    /// Default fetcher, standard validator chain, 3-attempt policy
    pub fn with_defaults() -> Self {
        Self::new(
            LibraryFetcher::default(),
            ValidatorChain::standard(),
            RetryPolicy::default(),
        )
    }

    /// Produces the validated item set for one account
    pub async fn scan(
        &self,
        client: &dyn CatalogClient,
        account: &Account,
    ) -> Result<Vec<Item>, ScanError> {
        info!("scanning remote library for {}", account);

        let fetcher = &self.fetcher;
        let chain = &self.chain;
        let result = with_retry(&self.policy, || async move {
            let items = fetcher.fetch_all(client, account).await?;
            chain.run(&items).map_err(CatalogError::from)?;
            Ok::<_, CatalogError>(items)
        })
        .await;

        match &result {
            Ok(items) => info!("validated {} item(s) for {}", items.len(), account),
            Err(err) => warn!(
                "scan failed for {} after {} attempt(s): {}",
                account,
                err.attempts(),
                err.last_error()
            ),
        }

        result
    }
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}
