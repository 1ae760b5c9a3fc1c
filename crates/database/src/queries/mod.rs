//! Database query operations

pub mod library;

// Re-export commonly used query functions
pub use library::{
    get_library_book, insert_library_book, list_library_books, list_library_books_for_account,
    remove_library_books, update_user_item,
};
