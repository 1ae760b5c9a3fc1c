//! Domain models shared across shelfsync crates

mod account;
mod book;
mod item;

pub use account::Account;
pub use book::{Book, LiberatedStatus, LibraryBook, UserDefinedItem};
pub use item::{
    ContentKind, Item, ProductId, Relationship, RelationshipKind, RelationshipToProduct,
    SeriesMembership,
};
