//! Remote catalog item models
//!
//! Items are the transient records returned by the storefront's library
//! listing endpoint. They are created fresh on every fetch cycle and never
//! mutated; the persisted projection lives in [`crate::types::LibraryBook`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable storefront product identifier
///
/// The natural key for all matching between remote items and local records.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from the storefront's identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of catalog record an item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// A regular purchasable product
    Product,
    /// A single episode belonging to a series of episodes
    Episode,
    /// A placeholder aggregate grouping child episodes; not a real purchase
    EpisodeParent,
}

/// Direction of a relationship link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipToProduct {
    /// The linked product is this item's parent
    Parent,
    /// The linked product is a child of this item
    Child,
}

/// What a relationship link expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Episode membership within an episode group
    Episode,
    /// Series membership
    Series,
}

/// A link between two catalog items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub product_id: ProductId,
    pub to_product: RelationshipToProduct,
    pub kind: RelationshipKind,
}

/// Series membership as reported by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMembership {
    pub name: String,
    pub sequence: Option<f32>,
}

/// A remotely-sourced catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub product_id: ProductId,
    pub title: String,
    pub authors: Vec<String>,
    pub narrators: Vec<String>,
    pub length_minutes: u32,
    pub categories: Vec<String>,
    pub series: Option<SeriesMembership>,
    /// Overall community rating, 0.0 to 5.0
    pub rating: Option<f32>,
    pub kind: ContentKind,
    pub relationships: Vec<Relationship>,
    pub pdf_url: Option<String>,
}

impl Item {
    /// Creates an item with required fields; optional sub-resources default empty
    pub fn new(product_id: ProductId, title: impl Into<String>) -> Self {
        Self {
            product_id,
            title: title.into(),
            authors: Vec::new(),
            narrators: Vec::new(),
            length_minutes: 0,
            categories: Vec::new(),
            series: None,
            rating: None,
            kind: ContentKind::Product,
            relationships: Vec::new(),
            pdf_url: None,
        }
    }

    /// Returns true if this item is an episode-group placeholder
    pub fn is_episode_parent(&self) -> bool {
        self.kind == ContentKind::EpisodeParent
    }

    /// Product ids of child episodes linked from this item
    pub fn child_episode_ids(&self) -> Vec<&ProductId> {
        self.relationships
            .iter()
            .filter(|r| {
                r.to_product == RelationshipToProduct::Child && r.kind == RelationshipKind::Episode
            })
            .map(|r| &r.product_id)
            .collect()
    }

    /// Returns true if the item carries a PDF companion
    pub fn has_pdf(&self) -> bool {
        self.pdf_url.is_some()
    }
}
