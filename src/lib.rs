//! Bazaar
//!
//! Bazaar is a small storefront engine: a product catalog with a search, filter and sort
//! pipeline, and a persistent shopping cart with per-line subtotals and a grand total.
//!
//! The catalog is loaded once from a [`feed::ProductFeed`] and is read-only afterwards. Cart
//! mutations go through a [`cart::CartStore`], which writes the whole cart to a
//! [`storage::KeyValueStore`] on every change. [`filter::filter_products`] and
//! [`summary::summarize`] are pure functions over read-only snapshots; rendering stays outside
//! the crate, fed by [`storefront::StorefrontView`] snapshots.

pub mod cart;
pub mod catalog;
pub mod feed;
pub mod filter;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod storage;
pub mod storefront;
pub mod summary;
pub mod tags;
pub mod utils;
