//! Catalog
//!
//! The in-memory collection of products available for browsing. Populated once from a
//! [`ProductFeed`] and read-only afterwards; a feed failure falls back to an empty catalog
//! rather than surfacing an error to the caller.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    feed::{FeedError, ProductFeed},
    products::{Product, ProductId},
};

/// Read-only product catalog.
///
/// Products keep their feed order; the id index is derived at construction. When the feed
/// repeats an id, the first occurrence wins for lookups.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from feed-ordered products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            index.entry(product.id).or_insert(position);
        }

        Self { products, index }
    }

    /// Load the catalog from a feed.
    ///
    /// Fail-soft: a feed error is folded into [`CatalogLoad::Unavailable`] and logged; it is
    /// never raised. [`CatalogLoad::into_catalog`] then yields an empty catalog, which the
    /// surrounding application renders as "no products".
    pub async fn load<F: ProductFeed + ?Sized>(feed: &F) -> CatalogLoad {
        match feed.fetch().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                CatalogLoad::Fetched(Self::new(products))
            }
            Err(error) => {
                tracing::warn!(%error, "product feed unavailable; falling back to empty catalog");
                CatalogLoad::Unavailable(error)
            }
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in feed order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate over the products in feed order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category values, in first-seen feed order.
    ///
    /// The order is stable across repeated calls for the same catalog state.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .filter(|product| seen.insert(product.category.as_str()))
            .map(|product| product.category.as_str())
            .collect()
    }
}

/// Typed outcome of a catalog load, so callers can tell a fetched-empty catalog from a
/// fallback-empty one.
#[derive(Debug)]
pub enum CatalogLoad {
    /// The feed answered; the catalog holds its products.
    Fetched(Catalog),

    /// The feed was unreachable or malformed; browsing proceeds over an empty catalog.
    Unavailable(FeedError),
}

impl CatalogLoad {
    /// The loaded catalog, or the empty catalog on fallback.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        match self {
            Self::Fetched(catalog) => catalog,
            Self::Unavailable(_) => Catalog::default(),
        }
    }

    /// Whether the feed answered successfully.
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}
