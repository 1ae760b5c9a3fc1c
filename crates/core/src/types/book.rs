//! Persisted library models
//!
//! A [`LibraryBook`] is the long-lived local record of a purchase: the
//! bibliographic projection of a catalog item plus the operator-defined state
//! (tags, download statuses) and account provenance.

use crate::types::{Account, Item, ProductId, SeriesMembership};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Download ("liberation") status of a book or its PDF companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiberatedStatus {
    NotLiberated,
    Liberated,
    Error,
}

impl LiberatedStatus {
    /// Integer encoding used by the persisted store
    pub fn code(self) -> i64 {
        match self {
            Self::NotLiberated => 0,
            Self::Liberated => 1,
            Self::Error => 2,
        }
    }

    /// Decodes the persisted integer form; unknown codes fall back to NotLiberated
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Liberated,
            2 => Self::Error,
            _ => Self::NotLiberated,
        }
    }
}

/// Operator-defined per-book state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedItem {
    /// Free-text tags
    pub tags: String,
    /// Audio download status
    pub book_status: LiberatedStatus,
    /// PDF companion download status; None when the book has no PDF
    pub pdf_status: Option<LiberatedStatus>,
}

impl UserDefinedItem {
    /// Initial state for a freshly imported book
    pub fn new(has_pdf: bool) -> Self {
        Self {
            tags: String::new(),
            book_status: LiberatedStatus::NotLiberated,
            pdf_status: has_pdf.then_some(LiberatedStatus::NotLiberated),
        }
    }
}

/// Persisted bibliographic projection of a catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub product_id: ProductId,
    pub title: String,
    pub authors: Vec<String>,
    pub narrators: Vec<String>,
    pub length_minutes: u32,
    pub categories: Vec<String>,
    pub series: Option<SeriesMembership>,
    pub rating: Option<f32>,
}

impl Book {
    /// Projects the persisted fields out of a fetched catalog item
    pub fn from_item(item: &Item) -> Self {
        Self {
            product_id: item.product_id.clone(),
            title: item.title.clone(),
            authors: item.authors.clone(),
            narrators: item.narrators.clone(),
            length_minutes: item.length_minutes,
            categories: item.categories.clone(),
            series: item.series.clone(),
            rating: item.rating,
        }
    }

    /// Formats the length as "H hr M min", empty when unknown
    pub fn length_display(&self) -> String {
        if self.length_minutes == 0 {
            return String::new();
        }
        format!("{} hr {} min", self.length_minutes / 60, self.length_minutes % 60)
    }
}

/// A locally tracked purchase: book plus operator state and provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryBook {
    pub book: Book,
    pub user_item: UserDefinedItem,
    /// Account the purchase was fetched under
    pub account: Account,
    pub date_added: DateTime<Utc>,
}

impl LibraryBook {
    /// Builds the initial local record for a newly fetched item
    pub fn from_item(item: &Item, account: Account) -> Self {
        Self {
            book: Book::from_item(item),
            user_item: UserDefinedItem::new(item.has_pdf()),
            account,
            date_added: Utc::now(),
        }
    }

    /// The natural key shared with the remote catalog
    pub fn product_id(&self) -> &ProductId {
        &self.book.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentKind;

    fn sample_item() -> Item {
        let mut item = Item::new(ProductId::new("B00ABC1234"), "Project Hail Mary");
        item.authors = vec!["Andy Weir".to_string()];
        item.narrators = vec!["Ray Porter".to_string()];
        item.length_minutes = 985;
        item.rating = Some(4.8);
        item
    }

    #[test]
    fn test_liberated_status_codes_round_trip() {
        for status in [
            LiberatedStatus::NotLiberated,
            LiberatedStatus::Liberated,
            LiberatedStatus::Error,
        ] {
            assert_eq!(LiberatedStatus::from_code(status.code()), status);
        }
    }

    #[test]
    fn test_unknown_status_code_falls_back() {
        assert_eq!(LiberatedStatus::from_code(99), LiberatedStatus::NotLiberated);
    }

    #[test]
    fn test_book_from_item() {
        let item = sample_item();
        let book = Book::from_item(&item);
        assert_eq!(book.product_id, item.product_id);
        assert_eq!(book.title, "Project Hail Mary");
        assert_eq!(book.authors, vec!["Andy Weir".to_string()]);
        assert_eq!(book.rating, Some(4.8));
    }

    #[test]
    fn test_length_display() {
        let mut book = Book::from_item(&sample_item());
        assert_eq!(book.length_display(), "16 hr 25 min");
        book.length_minutes = 0;
        assert_eq!(book.length_display(), "");
    }

    #[test]
    fn test_imported_book_without_pdf() {
        let item = sample_item();
        let lb = LibraryBook::from_item(&item, Account::new("reader@example.com", "us"));
        assert_eq!(lb.user_item.book_status, LiberatedStatus::NotLiberated);
        assert!(lb.user_item.pdf_status.is_none());
        assert!(lb.user_item.tags.is_empty());
    }

    #[test]
    fn test_imported_book_with_pdf() {
        let mut item = sample_item();
        item.kind = ContentKind::Product;
        item.pdf_url = Some("https://cds.example.com/companion.pdf".to_string());
        let lb = LibraryBook::from_item(&item, Account::new("reader@example.com", "us"));
        assert_eq!(lb.user_item.pdf_status, Some(LiberatedStatus::NotLiberated));
    }
}
