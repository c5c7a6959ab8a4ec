//! Filter-Sort Pipeline
//!
//! Pure function from a catalog snapshot and user-entered criteria to an ordered product
//! sequence. The pipeline never mutates its inputs; an empty result is a valid output that
//! callers render as an explicit "no results" state.

use std::str::FromStr;

use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

/// Requested result ordering.
///
/// All sorts are stable: products tying on the sort key keep their catalog (feed) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// No reordering; catalog order preserved.
    #[default]
    Catalog,

    /// Numeric ascending on price.
    PriceAscending,

    /// Numeric descending on price.
    PriceDescending,

    /// Case-insensitive ascending on name.
    NameAscending,

    /// Case-insensitive descending on name.
    NameDescending,
}

/// Raised when a sort-order token is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    /// Parse the UI select tokens: `price-asc`, `price-desc`, `alpha-asc`, `alpha-desc`, and
    /// `catalog` (or the empty string) for catalog order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "catalog" => Ok(Self::Catalog),
            "price-asc" => Ok(Self::PriceAscending),
            "price-desc" => Ok(Self::PriceDescending),
            "alpha-asc" => Ok(Self::NameAscending),
            "alpha-desc" => Ok(Self::NameDescending),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Category selector: the wildcard, or one exact category value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,

    /// Match exactly one category value.
    Category(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted == category,
        }
    }
}

/// User-entered filter state, rebuilt from the UI on each render.
///
/// The default value is the identity filter: empty query, wildcard category, unbounded price,
/// catalog order.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Free-text query, matched case-insensitively against name, category and tags.
    pub query: String,

    /// Category selector.
    pub category: CategoryFilter,

    /// Inclusive lower price bound in minor units.
    pub min_price: u64,

    /// Inclusive upper price bound in minor units; `None` is unbounded.
    pub max_price: Option<u64>,

    /// Result ordering.
    pub sort: SortOrder,
}

/// Apply the filter-sort pipeline to a catalog snapshot.
///
/// Retains products whose search text contains the lowercased trimmed query (an empty query
/// matches everything), whose category matches the selector, and whose price lies within the
/// inclusive bounds; then applies the requested stable sort.
pub fn filter_products<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.query.trim().to_lowercase();

    let mut matched: Vec<&Product> = catalog
        .iter()
        .filter(|product| {
            let in_text = needle.is_empty() || product.search_text().contains(&needle);
            let in_category = criteria.category.matches(&product.category);
            let in_bounds = product.price >= criteria.min_price
                && criteria.max_price.is_none_or(|max| product.price <= max);

            in_text && in_category && in_bounds
        })
        .collect();

    match criteria.sort {
        SortOrder::Catalog => {}
        SortOrder::PriceAscending => matched.sort_by_key(|product| product.price),
        SortOrder::PriceDescending => {
            matched.sort_by(|a, b| b.price.cmp(&a.price));
        }
        SortOrder::NameAscending => {
            matched.sort_by_cached_key(|product| product.name.to_lowercase());
        }
        SortOrder::NameDescending => {
            matched.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
        }
    }

    matched
}
