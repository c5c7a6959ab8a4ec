//! Storefront
//!
//! Composition root tying the catalog, the cart store and the two pure pipelines together.
//! Opening a storefront performs the one-time catalog load and cart restore, both fail-soft;
//! afterwards it serves read-only [`StorefrontView`] snapshots for the presentation layer and
//! forwards cart mutations.

use rusty_money::iso::Currency;

use crate::{
    cart::{Cart, CartObserver, CartRestore, CartStore, PersistError},
    catalog::{Catalog, CatalogLoad},
    feed::{FeedError, ProductFeed},
    filter::{FilterCriteria, filter_products},
    products::{Product, ProductId},
    storage::KeyValueStore,
    summary::{CartSummary, SummaryError, summarize},
};

/// Read-only snapshot handed to the presentation layer after every mutation or filter change.
#[derive(Debug)]
pub struct StorefrontView<'a> {
    /// Products surviving the filter-sort pipeline, in requested order.
    pub products: Vec<&'a Product>,

    /// Aggregated cart: line items with subtotals, grand total, item count.
    pub summary: CartSummary<'a>,
}

/// A catalog plus a persistent cart, with snapshot-based presentation access.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    currency: &'static Currency,
    feed_error: Option<FeedError>,
    restore: CartRestore,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Load the catalog from the feed and restore the persisted cart.
    ///
    /// Both steps are fail-soft: a feed failure leaves an empty catalog (inspectable through
    /// [`Storefront::feed_error`]) and a missing or corrupt stored cart leaves an empty cart
    /// (inspectable through [`Storefront::cart_restore`]). Opening never fails.
    pub async fn open<F: ProductFeed + ?Sized>(
        feed: &F,
        storage: S,
        currency: &'static Currency,
    ) -> Self {
        let (catalog, feed_error) = match Catalog::load(feed).await {
            CatalogLoad::Fetched(catalog) => (catalog, None),
            CatalogLoad::Unavailable(error) => (Catalog::default(), Some(error)),
        };

        let mut cart = CartStore::new(storage);
        let restore = cart.restore();

        Self {
            catalog,
            cart,
            currency,
            feed_error,
            restore,
        }
    }

    /// The loaded catalog snapshot.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart state.
    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// Currency all totals are denominated in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The feed error swallowed at open time, if the catalog fell back to empty.
    pub fn feed_error(&self) -> Option<&FeedError> {
        self.feed_error.as_ref()
    }

    /// Outcome of the cart restore performed at open time.
    pub fn cart_restore(&self) -> &CartRestore {
        &self.restore
    }

    /// Install the cart change-notification observer.
    pub fn set_cart_observer(&mut self, observer: Box<dyn CartObserver>) {
        self.cart.set_observer(observer);
    }

    /// Add one unit of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory cart keeps the
    /// mutation.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), PersistError> {
        self.cart.add_item(id)
    }

    /// Apply a signed quantity delta to a cart line; silent no-op for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory cart keeps the
    /// mutation.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<(), PersistError> {
        self.cart.change_quantity(id, delta)
    }

    /// Remove a product's cart line if present.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory cart keeps the
    /// mutation.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), PersistError> {
        self.cart.remove_item(id)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory cart keeps the
    /// mutation.
    pub fn clear_cart(&mut self) -> Result<(), PersistError> {
        self.cart.clear()
    }

    /// Produce the presentation snapshot for the given filter criteria.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] when cart aggregation overflows minor-unit arithmetic.
    pub fn view(&self, criteria: &FilterCriteria) -> Result<StorefrontView<'_>, SummaryError> {
        Ok(StorefrontView {
            products: filter_products(&self.catalog, criteria),
            summary: summarize(self.cart.cart(), &self.catalog, self.currency)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        feed::StaticProductFeed,
        storage::MemoryStore,
        tags::ProductTags,
    };

    use super::*;

    fn sample_feed() -> StaticProductFeed {
        StaticProductFeed::new(vec![
            Product {
                id: ProductId(1),
                name: "Apple".to_string(),
                category: "Fruit".to_string(),
                price: 10_000,
                short: String::new(),
                description: None,
                image: String::new(),
                tags: ProductTags::default(),
            },
            Product {
                id: ProductId(2),
                name: "Bread".to_string(),
                category: "Bakery".to_string(),
                price: 5_000,
                short: String::new(),
                description: None,
                image: String::new(),
                tags: ProductTags::default(),
            },
        ])
    }

    #[tokio::test]
    async fn open_loads_catalog_and_starts_with_an_empty_cart() -> TestResult {
        let storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

        assert_eq!(storefront.catalog().len(), 2);
        assert!(storefront.cart().is_empty());
        assert!(storefront.feed_error().is_none());
        assert!(matches!(storefront.cart_restore(), CartRestore::Empty));

        Ok(())
    }

    #[tokio::test]
    async fn view_reflects_mutations_immediately() -> TestResult {
        let mut storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

        storefront.add_to_cart(ProductId(1))?;
        storefront.add_to_cart(ProductId(1))?;
        storefront.add_to_cart(ProductId(2))?;

        let view = storefront.view(&FilterCriteria::default())?;

        assert_eq!(view.products.len(), 2);
        assert_eq!(view.summary.grand_total(), Money::from_minor(25_000, iso::USD));
        assert_eq!(view.summary.item_count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn filtered_view_narrows_products_without_touching_the_cart() -> TestResult {
        let mut storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

        storefront.add_to_cart(ProductId(1))?;

        let criteria = FilterCriteria {
            query: "bread".to_string(),
            ..FilterCriteria::default()
        };
        let view = storefront.view(&criteria)?;

        assert_eq!(view.products.len(), 1);
        assert_eq!(view.summary.item_count(), 1);

        Ok(())
    }
}
