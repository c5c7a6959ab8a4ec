//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoStorefrontArgs {
    /// URL of a JSON product feed; a built-in catalog is used when omitted
    #[clap(short, long)]
    pub url: Option<String>,

    /// Free-text search query
    #[clap(short, long, default_value = "")]
    pub query: String,

    /// Category filter; all categories when omitted
    #[clap(short, long)]
    pub category: Option<String>,

    /// Sort order: price-asc, price-desc, alpha-asc, alpha-desc or catalog
    #[clap(short, long, default_value = "catalog")]
    pub sort: String,

    /// Inclusive lower price bound in minor units
    #[clap(long, default_value_t = 0)]
    pub min_price: u64,

    /// Inclusive upper price bound in minor units
    #[clap(long)]
    pub max_price: Option<u64>,
}
