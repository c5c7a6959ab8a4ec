//! Storefront Demo
//!
//! Loads a product catalog (from `--url`, or a built-in fixture when omitted), applies the
//! requested filters, puts a few items in a cart persisted under a temporary directory, and
//! prints the filtered listing plus a receipt.
//!
//! Use `-q` to search, `-c` to pick a category, `-s` to sort (`price-asc`, `price-desc`,
//! `alpha-asc`, `alpha-desc`, `catalog`) and `--min-price`/`--max-price` to bound prices.

use std::io;

use anyhow::Result;
use clap::Parser;
use rusty_money::iso;

use bazaar::{
    feed::{HttpProductFeed, StaticProductFeed},
    filter::{CategoryFilter, FilterCriteria},
    products::{Product, ProductId},
    receipt::Receipt,
    storage::FileStore,
    storefront::Storefront,
    tags::ProductTags,
    utils::DemoStorefrontArgs,
};

fn built_in_products() -> Vec<Product> {
    let record = |id: u64, name: &str, category: &str, price: u64, tags: &[&str]| Product {
        id: ProductId(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        short: String::new(),
        description: None,
        image: String::new(),
        tags: ProductTags::from_strs(tags),
    };

    vec![
        record(1, "Granny Smith Apple", "Fruit", 75, &["fresh", "produce"]),
        record(2, "Organic Banana", "Fruit", 50, &["fresh", "produce"]),
        record(3, "Sourdough Loaf", "Bakery", 220, &["baked"]),
        record(4, "Butter Croissant", "Bakery", 180, &["baked"]),
        record(5, "Whole Milk 1L", "Dairy", 150, &["chilled"]),
        record(6, "Cheddar Cheese 200g", "Dairy", 300, &["chilled"]),
    ]
}

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
async fn main() -> Result<()> {
    let args = DemoStorefrontArgs::parse();

    let criteria = FilterCriteria {
        query: args.query,
        category: args
            .category
            .map_or(CategoryFilter::All, CategoryFilter::Category),
        min_price: args.min_price,
        max_price: args.max_price,
        sort: args.sort.parse()?,
    };

    let storage_dir = tempfile::tempdir()?;
    let storage = FileStore::new(storage_dir.path());

    let mut storefront = match args.url {
        Some(url) => Storefront::open(&HttpProductFeed::new(url), storage, iso::USD).await,
        None => {
            let feed = StaticProductFeed::new(built_in_products());
            Storefront::open(&feed, storage, iso::USD).await
        }
    };

    if let Some(error) = storefront.feed_error() {
        println!("Feed unavailable ({error}); browsing an empty catalog.");
    }

    // Put something in the cart so the receipt has lines to show.
    let first_ids: Vec<ProductId> = storefront
        .catalog()
        .iter()
        .take(2)
        .map(|product| product.id)
        .collect();

    for id in first_ids {
        storefront.add_to_cart(id)?;
    }

    if let Some(id) = storefront.catalog().iter().next().map(|product| product.id) {
        storefront.change_quantity(id, 2)?;
    }

    let view = storefront.view(&criteria)?;

    if view.products.is_empty() {
        println!("No products found.");
    } else {
        println!("Products ({}):", view.products.len());
        for product in &view.products {
            println!(
                "  #{:<4} {:<24} {:<10} {}",
                product.id,
                product.name,
                product.category,
                line_price(product)
            );
        }
    }

    println!();

    let stdout = io::stdout();
    let handle = stdout.lock();

    Receipt::new(&view.summary).write_to(handle)?;

    Ok(())
}

fn line_price(product: &Product) -> String {
    i64::try_from(product.price).map_or_else(
        |_err| format!("{} minor units", product.price),
        |minor| rusty_money::Money::from_minor(minor, iso::USD).to_string(),
    )
}
