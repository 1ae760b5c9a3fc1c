// crates/reconcile/src/import.rs
//! Import of newly purchased items into the local library

use log::info;
use shelfsync_core::{Account, AppError, Item, LibraryBook, ProductId};
use shelfsync_database::queries::library::{insert_library_book, list_library_books};
use shelfsync_database::DbPool;
use std::collections::HashSet;

/// Result of importing one account's validated item set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Items in the validated remote set
    pub total_remote: usize,
    /// Items that were not yet tracked and got inserted
    pub imported: usize,
}

/// Inserts every item that is not yet tracked locally
///
/// Idempotent per product id: items already present anywhere in the local
/// library are skipped, so re-running a scan never duplicates records. New
/// books start as not liberated, with the PDF status derived from whether
/// the item carries a PDF companion.
pub async fn import_new_items(
    pool: &DbPool,
    account: &Account,
    items: &[Item],
) -> Result<ImportOutcome, AppError> {
    let tracked: HashSet<ProductId> = list_library_books(pool)
        .await?
        .into_iter()
        .map(|lb| lb.book.product_id)
        .collect();

    let mut imported = 0;
    for item in items {
        if tracked.contains(&item.product_id) {
            continue;
        }
        insert_library_book(pool, &LibraryBook::from_item(item, account.clone())).await?;
        imported += 1;
    }

    if imported > 0 {
        info!("imported {} new book(s) for {}", imported, account);
    }

    Ok(ImportOutcome {
        total_remote: items.len(),
        imported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfsync_database::{connect_in_memory, run_migrations};

    async fn setup() -> DbPool {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn item(id: &str) -> Item {
        let mut item = Item::new(ProductId::new(id), format!("Title {}", id));
        item.authors = vec!["Some Author".to_string()];
        item
    }

    #[tokio::test]
    async fn test_import_inserts_untracked_items() {
        let pool = setup().await;
        let account = Account::new("reader@example.com", "us");

        let outcome = import_new_items(&pool, &account, &[item("B001"), item("B002")])
            .await
            .unwrap();

        assert_eq!(outcome.total_remote, 2);
        assert_eq!(outcome.imported, 2);
        assert_eq!(list_library_books(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let pool = setup().await;
        let account = Account::new("reader@example.com", "us");
        let items = [item("B001"), item("B002")];

        import_new_items(&pool, &account, &items).await.unwrap();
        let second = import_new_items(&pool, &account, &items).await.unwrap();

        assert_eq!(second.imported, 0);
        assert_eq!(second.total_remote, 2);
        assert_eq!(list_library_books(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_only_adds_missing_items() {
        let pool = setup().await;
        let account = Account::new("reader@example.com", "us");

        import_new_items(&pool, &account, &[item("B001")]).await.unwrap();
        let outcome = import_new_items(&pool, &account, &[item("B001"), item("B002")])
            .await
            .unwrap();

        assert_eq!(outcome.imported, 1);
    }
}
