pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, Result};
pub use types::{
    Account, Book, ContentKind, Item, LiberatedStatus, LibraryBook, ProductId, Relationship,
    RelationshipKind, RelationshipToProduct, SeriesMembership, UserDefinedItem,
};
