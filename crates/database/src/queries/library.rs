//! Library book persistence
//!
//! One row per tracked purchase, keyed by product id. Batch removal is the
//! only multi-row write and runs inside a single transaction: either every
//! id in the approved batch is removed or none are.

use crate::DbPool;
use chrono::{DateTime, Utc};
use shelfsync_core::{
    Account, AppError, Book, LiberatedStatus, LibraryBook, ProductId, SeriesMembership,
    UserDefinedItem,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const SELECT_COLUMNS: &str = r#"
    SELECT product_id, title, authors, narrators, length_minutes, categories,
           series_name, series_sequence, rating, tags, book_status, pdf_status,
           account_username, account_locale, date_added
    FROM library_books
"#;

/// Inserts a newly imported library book
///
/// Fails if the product id is already tracked; the local library holds at
/// most one record per product id.
pub async fn insert_library_book(pool: &DbPool, library_book: &LibraryBook) -> Result<(), AppError> {
    let book = &library_book.book;
    let authors_json = serde_json::to_string(&book.authors)
        .map_err(|e| AppError::database("Failed to serialize authors", e))?;
    let narrators_json = serde_json::to_string(&book.narrators)
        .map_err(|e| AppError::database("Failed to serialize narrators", e))?;
    let categories_json = serde_json::to_string(&book.categories)
        .map_err(|e| AppError::database("Failed to serialize categories", e))?;

    sqlx::query(
        r#"
        INSERT INTO library_books (
            product_id, title, authors, narrators, length_minutes, categories,
            series_name, series_sequence, rating, tags, book_status, pdf_status,
            account_username, account_locale, date_added
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(book.product_id.as_str())
    .bind(&book.title)
    .bind(authors_json)
    .bind(narrators_json)
    .bind(book.length_minutes as i64)
    .bind(categories_json)
    .bind(book.series.as_ref().map(|s| s.name.as_str()))
    .bind(book.series.as_ref().and_then(|s| s.sequence).map(f64::from))
    .bind(book.rating.map(f64::from))
    .bind(&library_book.user_item.tags)
    .bind(library_book.user_item.book_status.code())
    .bind(library_book.user_item.pdf_status.map(LiberatedStatus::code))
    .bind(library_book.account.username())
    .bind(library_book.account.locale())
    .bind(library_book.date_added.timestamp_millis())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to insert library book", e))?;

    Ok(())
}

/// Gets a library book by product id
pub async fn get_library_book(pool: &DbPool, id: &ProductId) -> Result<LibraryBook, AppError> {
    let row = sqlx::query(&format!("{} WHERE product_id = ?", SELECT_COLUMNS))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database("Failed to fetch library book", e))?
        .ok_or_else(|| AppError::book_not_found(id.as_str()))?;

    row_to_library_book(&row)
}

/// Lists every tracked library book
pub async fn list_library_books(pool: &DbPool) -> Result<Vec<LibraryBook>, AppError> {
    let rows = sqlx::query(&format!("{} ORDER BY date_added DESC", SELECT_COLUMNS))
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database("Failed to list library books", e))?;

    rows.iter().map(row_to_library_book).collect()
}

/// Lists the library books owned by one account's provenance
pub async fn list_library_books_for_account(
    pool: &DbPool,
    account: &Account,
) -> Result<Vec<LibraryBook>, AppError> {
    let rows = sqlx::query(&format!(
        "{} WHERE account_username = ? AND account_locale = ? ORDER BY date_added DESC",
        SELECT_COLUMNS
    ))
    .bind(account.username())
    .bind(account.locale())
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list library books for account", e))?;

    rows.iter().map(row_to_library_book).collect()
}

/// Replaces the operator-defined state (tags, statuses) of one book
pub async fn update_user_item(
    pool: &DbPool,
    id: &ProductId,
    user_item: &UserDefinedItem,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE library_books SET tags = ?, book_status = ?, pdf_status = ? WHERE product_id = ?",
    )
    .bind(&user_item.tags)
    .bind(user_item.book_status.code())
    .bind(user_item.pdf_status.map(LiberatedStatus::code))
    .bind(id.as_str())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to update user item", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::book_not_found(id.as_str()));
    }

    Ok(())
}

/// Removes an approved batch of library books, atomically
///
/// Runs in one transaction and requires every id to match an existing row;
/// any miss rolls the whole batch back so a persistence failure never leaves
/// the store partially reconciled. Returns the number of rows removed.
pub async fn remove_library_books(pool: &DbPool, ids: &[ProductId]) -> Result<u64, AppError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database("Failed to begin removal transaction", e))?;

    for id in ids {
        let result = sqlx::query("DELETE FROM library_books WHERE product_id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database("Failed to delete library book", e))?;

        if result.rows_affected() != 1 {
            tx.rollback()
                .await
                .map_err(|e| AppError::database("Failed to roll back removal", e))?;
            return Err(AppError::book_not_found(id.as_str()));
        }
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database("Failed to commit removal", e))?;

    Ok(ids.len() as u64)
}

fn row_to_library_book(row: &SqliteRow) -> Result<LibraryBook, AppError> {
    let authors: Vec<String> = serde_json::from_str(row.get("authors"))
        .map_err(|e| AppError::database("Failed to parse authors", e))?;
    let narrators: Vec<String> = serde_json::from_str(row.get("narrators"))
        .map_err(|e| AppError::database("Failed to parse narrators", e))?;
    let categories: Vec<String> = serde_json::from_str(row.get("categories"))
        .map_err(|e| AppError::database("Failed to parse categories", e))?;

    let series = row
        .get::<Option<String>, _>("series_name")
        .map(|name| SeriesMembership {
            name,
            sequence: row.get::<Option<f64>, _>("series_sequence").map(|s| s as f32),
        });

    let date_added_millis: i64 = row.get("date_added");
    let date_added: DateTime<Utc> =
        DateTime::from_timestamp_millis(date_added_millis).ok_or_else(|| AppError::Internal {
            message: format!("invalid date_added timestamp: {}", date_added_millis),
        })?;

    Ok(LibraryBook {
        book: Book {
            product_id: ProductId::new(row.get::<String, _>("product_id")),
            title: row.get("title"),
            authors,
            narrators,
            length_minutes: row.get::<i64, _>("length_minutes") as u32,
            categories,
            series,
            rating: row.get::<Option<f64>, _>("rating").map(|r| r as f32),
        },
        user_item: UserDefinedItem {
            tags: row.get("tags"),
            book_status: LiberatedStatus::from_code(row.get("book_status")),
            pdf_status: row
                .get::<Option<i64>, _>("pdf_status")
                .map(LiberatedStatus::from_code),
        },
        account: Account::new(
            row.get::<String, _>("account_username"),
            row.get::<String, _>("account_locale"),
        ),
        date_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_in_memory;
    use crate::migrations::run_migrations;
    use shelfsync_core::Item;

    async fn setup() -> DbPool {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn account() -> Account {
        Account::new("reader@example.com", "us")
    }

    fn sample_book(id: &str, account: &Account) -> LibraryBook {
        let mut item = Item::new(ProductId::new(id), format!("Title {}", id));
        item.authors = vec!["Some Author".to_string()];
        item.narrators = vec!["Some Narrator".to_string()];
        item.length_minutes = 612;
        item.categories = vec!["Science Fiction".to_string()];
        item.series = Some(SeriesMembership {
            name: "A Series".to_string(),
            sequence: Some(2.0),
        });
        item.rating = Some(4.5);
        LibraryBook::from_item(&item, account.clone())
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let pool = setup().await;
        let lb = sample_book("B001", &account());

        insert_library_book(&pool, &lb).await.unwrap();
        let fetched = get_library_book(&pool, &ProductId::new("B001")).await.unwrap();

        assert_eq!(fetched.book, lb.book);
        assert_eq!(fetched.user_item, lb.user_item);
        assert_eq!(fetched.account, lb.account);
        assert_eq!(
            fetched.date_added.timestamp_millis(),
            lb.date_added.timestamp_millis()
        );
    }

    #[tokio::test]
    async fn test_duplicate_product_id_rejected() {
        let pool = setup().await;
        let lb = sample_book("B001", &account());

        insert_library_book(&pool, &lb).await.unwrap();
        let result = insert_library_book(&pool, &lb).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let pool = setup().await;
        let result = get_library_book(&pool, &ProductId::new("B404")).await;
        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_restricted_to_account() {
        let pool = setup().await;
        let us = account();
        let uk = Account::new("reader@example.com", "uk");

        insert_library_book(&pool, &sample_book("B001", &us)).await.unwrap();
        insert_library_book(&pool, &sample_book("B002", &us)).await.unwrap();
        insert_library_book(&pool, &sample_book("B003", &uk)).await.unwrap();

        let all = list_library_books(&pool).await.unwrap();
        let us_books = list_library_books_for_account(&pool, &us).await.unwrap();
        let uk_books = list_library_books_for_account(&pool, &uk).await.unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(us_books.len(), 2);
        assert_eq!(uk_books.len(), 1);
        assert_eq!(uk_books[0].product_id().as_str(), "B003");
    }

    #[tokio::test]
    async fn test_update_user_item() {
        let pool = setup().await;
        let lb = sample_book("B001", &account());
        insert_library_book(&pool, &lb).await.unwrap();

        let updated = UserDefinedItem {
            tags: "space favorites".to_string(),
            book_status: LiberatedStatus::Liberated,
            pdf_status: None,
        };
        update_user_item(&pool, &ProductId::new("B001"), &updated).await.unwrap();

        let fetched = get_library_book(&pool, &ProductId::new("B001")).await.unwrap();
        assert_eq!(fetched.user_item, updated);
    }

    #[tokio::test]
    async fn test_update_user_item_missing_book() {
        let pool = setup().await;
        let result = update_user_item(
            &pool,
            &ProductId::new("B404"),
            &UserDefinedItem::new(false),
        )
        .await;
        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_full_batch() {
        let pool = setup().await;
        let acct = account();
        for id in ["B001", "B002", "B003"] {
            insert_library_book(&pool, &sample_book(id, &acct)).await.unwrap();
        }

        let removed = remove_library_books(
            &pool,
            &[ProductId::new("B001"), ProductId::new("B003")],
        )
        .await
        .unwrap();

        assert_eq!(removed, 2);
        let remaining = list_library_books(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id().as_str(), "B002");
    }

    #[tokio::test]
    async fn test_remove_empty_batch_is_noop() {
        let pool = setup().await;
        insert_library_book(&pool, &sample_book("B001", &account())).await.unwrap();

        let removed = remove_library_books(&pool, &[]).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(list_library_books(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_batch_removal_leaves_store_unchanged() {
        let pool = setup().await;
        let acct = account();
        for id in ["B001", "B002", "B003"] {
            insert_library_book(&pool, &sample_book(id, &acct)).await.unwrap();
        }

        // B404 is not tracked; the whole batch must roll back
        let result = remove_library_books(
            &pool,
            &[
                ProductId::new("B001"),
                ProductId::new("B404"),
                ProductId::new("B002"),
            ],
        )
        .await;

        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
        assert_eq!(list_library_books(&pool).await.unwrap().len(), 3);
    }
}
