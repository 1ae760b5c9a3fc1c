// crates/catalog/src/fetcher.rs
//! Paginated library fetch

use crate::client::{CatalogClient, ResponseGroups};
use crate::error::ClientError;
use log::debug;
use shelfsync_core::{Account, Item};

/// Page size used when the caller does not configure one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Fetches an account's complete library by exhausting all result pages
///
/// The stitched collection has every episode-group placeholder record
/// removed: the listing endpoint reports these parent aggregates alongside
/// real purchases, and keeping them corrupts counts and reconciliation
/// downstream. Failures from the client are propagated unwrapped; retry is
/// the scanner's job.
#[derive(Debug, Clone)]
pub struct LibraryFetcher {
    page_size: u32,
    response_groups: ResponseGroups,
}

impl LibraryFetcher {
    /// Creates a fetcher with the given page size and all response groups
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            response_groups: ResponseGroups::all(),
        }
    }

    /// Overrides the response-group configuration
    pub fn with_response_groups(mut self, response_groups: ResponseGroups) -> Self {
        self.response_groups = response_groups;
        self
    }

    /// Returns the configured page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches every page of the account's library into one collection
    pub async fn fetch_all(
        &self,
        client: &dyn CatalogClient,
        account: &Account,
    ) -> Result<Vec<Item>, ClientError> {
        let mut items = Vec::new();
        let mut page_number = 1;

        loop {
            let page = client
                .fetch_library_page(account, page_number, self.page_size, &self.response_groups)
                .await?;

            debug!(
                "fetched page {} for {}: {} item(s), has_more={}",
                page_number,
                account,
                page.items.len(),
                page.has_more
            );

            items.extend(page.items);

            if !page.has_more {
                break;
            }
            page_number += 1;
        }

        let before = items.len();
        items.retain(|item| !item.is_episode_parent());
        if items.len() < before {
            debug!("dropped {} episode-parent record(s)", before - items.len());
        }

        Ok(items)
    }
}

impl Default for LibraryFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LibraryPage;
    use async_trait::async_trait;
    use shelfsync_core::{ContentKind, ProductId};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct PagedClient {
        pages: Vec<Vec<Item>>,
        calls: AtomicU32,
    }

    impl PagedClient {
        fn new(pages: Vec<Vec<Item>>) -> Self {
            Self {
                pages,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogClient for PagedClient {
        async fn fetch_library_page(
            &self,
            _account: &Account,
            page_number: u32,
            _page_size: u32,
            _response_groups: &ResponseGroups,
        ) -> Result<LibraryPage, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index = (page_number - 1) as usize;
            match self.pages.get(index) {
                Some(items) => Ok(LibraryPage {
                    items: items.clone(),
                    has_more: index + 1 < self.pages.len(),
                }),
                None => Ok(LibraryPage::empty()),
            }
        }
    }

    fn item(id: &str) -> Item {
        Item::new(ProductId::new(id), format!("Title {}", id))
    }

    fn parent(id: &str) -> Item {
        let mut i = item(id);
        i.kind = ContentKind::EpisodeParent;
        i
    }

    fn account() -> Account {
        Account::new("reader@example.com", "us")
    }

    #[tokio::test]
    async fn test_fetch_all_stitches_pages() {
        let client = PagedClient::new(vec![
            vec![item("B001"), item("B002")],
            vec![item("B003")],
        ]);
        let fetcher = LibraryFetcher::new(2);

        let items = fetcher.fetch_all(&client, &account()).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_strips_episode_parents() {
        let client = PagedClient::new(vec![
            vec![item("B001"), parent("B00PODCAST")],
            vec![parent("B00OTHERPOD"), item("B002")],
        ]);
        let fetcher = LibraryFetcher::default();

        let items = fetcher.fetch_all(&client, &account()).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.is_episode_parent()));
    }

    #[tokio::test]
    async fn test_fetch_all_empty_library() {
        let client = PagedClient::new(vec![]);
        let fetcher = LibraryFetcher::default();

        let items = fetcher.fetch_all(&client, &account()).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_errors_propagate_unwrapped() {
        struct FailingClient;

        #[async_trait]
        impl CatalogClient for FailingClient {
            async fn fetch_library_page(
                &self,
                _account: &Account,
                _page_number: u32,
                _page_size: u32,
                _response_groups: &ResponseGroups,
            ) -> Result<LibraryPage, ClientError> {
                Err(ClientError::Protocol("truncated json".to_string()))
            }
        }

        let fetcher = LibraryFetcher::default();
        let err = fetcher.fetch_all(&FailingClient, &account()).await.unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }
}
