//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CART_KEY, Cart, CartLine, CartObserver, CartRestore, CartStore, NoopObserver,
        PersistError, RestoreError,
    },
    catalog::{Catalog, CatalogLoad},
    feed::{FeedError, HttpProductFeed, ProductFeed, StaticProductFeed},
    filter::{CategoryFilter, FilterCriteria, SortOrder, UnknownSortOrder, filter_products},
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
    storefront::{Storefront, StorefrontView},
    summary::{CartSummary, LineItem, SummaryError, summarize},
    tags::ProductTags,
};
