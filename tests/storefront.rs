//! End-to-end storefront scenarios: catalog load, cart mutations, filtering and aggregation
//! through the public composition root.

use reqwest::StatusCode;
use rusty_money::{Money, iso};
use testresult::TestResult;

use bazaar::{
    cart::CartRestore,
    feed::{FeedError, MockProductFeed, StaticProductFeed},
    filter::{CategoryFilter, FilterCriteria, SortOrder},
    products::{Product, ProductId},
    storage::MemoryStore,
    storefront::Storefront,
    tags::ProductTags,
};

fn product(id: u64, name: &str, category: &str, price: u64) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        short: String::new(),
        description: None,
        image: String::new(),
        tags: ProductTags::default(),
    }
}

fn sample_feed() -> StaticProductFeed {
    StaticProductFeed::new(vec![
        product(1, "Apple", "Fruit", 10_000),
        product(2, "Bread", "Bakery", 5_000),
    ])
}

#[tokio::test]
async fn add_twice_then_once_matches_the_expected_cart_and_total() -> TestResult {
    let mut storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

    storefront.add_to_cart(ProductId(1))?;
    storefront.add_to_cart(ProductId(1))?;
    storefront.add_to_cart(ProductId(2))?;

    let cart: Vec<(ProductId, u32)> = storefront
        .cart()
        .lines()
        .iter()
        .map(|line| (line.id, line.qty))
        .collect();

    assert_eq!(cart, [(ProductId(1), 2), (ProductId(2), 1)]);

    let view = storefront.view(&FilterCriteria::default())?;

    assert_eq!(view.summary.grand_total(), Money::from_minor(25_000, iso::USD));

    Ok(())
}

#[tokio::test]
async fn query_filter_returns_only_the_matching_product() -> TestResult {
    let storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

    let criteria = FilterCriteria {
        query: "bread".to_string(),
        category: CategoryFilter::All,
        ..FilterCriteria::default()
    };
    let view = storefront.view(&criteria)?;

    let ids: Vec<ProductId> = view.products.iter().map(|product| product.id).collect();

    assert_eq!(ids, [ProductId(2)]);

    Ok(())
}

#[tokio::test]
async fn repeated_decrement_removes_the_line_at_zero() -> TestResult {
    let mut storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

    storefront.add_to_cart(ProductId(1))?;
    storefront.add_to_cart(ProductId(1))?;
    storefront.add_to_cart(ProductId(2))?;

    storefront.change_quantity(ProductId(2), -1)?;
    // The line is gone; the second decrement is a silent no-op.
    storefront.change_quantity(ProductId(2), -1)?;

    let cart: Vec<(ProductId, u32)> = storefront
        .cart()
        .lines()
        .iter()
        .map(|line| (line.id, line.qty))
        .collect();

    assert_eq!(cart, [(ProductId(1), 2)]);

    Ok(())
}

#[tokio::test]
async fn stale_cart_lines_are_hidden_but_not_dropped() -> TestResult {
    // First session sees both products and fills the cart.
    let mut first = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;
    first.add_to_cart(ProductId(1))?;
    first.add_to_cart(ProductId(2))?;

    // A later feed no longer carries Bread; the cart still references it.
    let shrunk_feed = StaticProductFeed::new(vec![product(1, "Apple", "Fruit", 10_000)]);
    let mut second = Storefront::open(&shrunk_feed, MemoryStore::new(), iso::USD).await;
    second.add_to_cart(ProductId(1))?;
    second.add_to_cart(ProductId(2))?;

    let view = second.view(&FilterCriteria::default())?;

    assert_eq!(view.summary.lines().len(), 1);
    assert_eq!(view.summary.grand_total(), Money::from_minor(10_000, iso::USD));
    assert_eq!(view.summary.item_count(), 2);
    assert_eq!(second.cart().len(), 2);

    Ok(())
}

#[tokio::test]
async fn sorted_view_orders_products_by_price() -> TestResult {
    let storefront = Storefront::open(&sample_feed(), MemoryStore::new(), iso::USD).await;

    let criteria = FilterCriteria {
        sort: SortOrder::PriceAscending,
        ..FilterCriteria::default()
    };
    let view = storefront.view(&criteria)?;

    let ids: Vec<ProductId> = view.products.iter().map(|product| product.id).collect();

    assert_eq!(ids, [ProductId(2), ProductId(1)]);

    Ok(())
}

#[tokio::test]
async fn feed_failure_opens_an_empty_browsable_storefront() -> TestResult {
    let mut feed = MockProductFeed::new();
    feed.expect_fetch()
        .returning(|| Err(FeedError::Status(StatusCode::SERVICE_UNAVAILABLE)));

    let mut storefront = Storefront::open(&feed, MemoryStore::new(), iso::USD).await;

    assert!(storefront.catalog().is_empty());
    assert!(storefront.feed_error().is_some());
    assert!(matches!(storefront.cart_restore(), CartRestore::Empty));

    // The storefront still behaves: filtering yields no results, the cart still mutates, and
    // everything in it is a stale reference.
    storefront.add_to_cart(ProductId(1))?;
    let view = storefront.view(&FilterCriteria::default())?;

    assert!(view.products.is_empty());
    assert!(view.summary.is_empty());
    assert_eq!(view.summary.grand_total(), Money::from_minor(0, iso::USD));
    assert_eq!(view.summary.item_count(), 1);

    Ok(())
}
