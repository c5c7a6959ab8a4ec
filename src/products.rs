//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::ProductTags;

/// Product identifier, assigned by the external feed.
///
/// Unique within a catalog. Cart lines hold these ids across sessions, so an id may outlive
/// the product it once referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Catalog entry, immutable for the session once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Feed-assigned identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Category used by the exact-match category filter.
    pub category: String,

    /// Price in integer minor units.
    pub price: u64,

    /// Short description shown on listing cards.
    #[serde(default)]
    pub short: String,

    /// Long description, if the feed provides one.
    #[serde(default)]
    pub description: Option<String>,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    /// Free-form tags.
    #[serde(default)]
    pub tags: ProductTags,
}

impl Product {
    /// Lowercased haystack the free-text query is matched against: name, category and tags.
    pub(crate) fn search_text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.category).to_lowercase();

        if !self.tags.is_empty() {
            text.push(' ');
            text.push_str(&self.tags.search_fragment());
        }

        text
    }
}
