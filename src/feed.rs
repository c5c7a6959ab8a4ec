//! Product Feed
//!
//! The external source the catalog is loaded from, once, at startup. The feed is the only
//! asynchronous boundary in the crate.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::products::Product;

/// Errors raised while fetching or decoding the product feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed endpoint could not be reached.
    #[error("product feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed endpoint answered with a non-success status.
    #[error("product feed returned status {0}")]
    Status(StatusCode),

    /// The feed body was not a valid product array.
    #[error("failed to decode product feed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of product records.
///
/// The catalog consumes this as an opaque data source; shapes beyond "a JSON array of product
/// records" are the implementation's concern.
#[automock]
#[async_trait]
pub trait ProductFeed: Send + Sync {
    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] when the source is unreachable, answers with a non-success
    /// status, or serves a malformed body.
    async fn fetch(&self) -> Result<Vec<Product>, FeedError>;
}

/// Feed backed by an HTTP endpoint serving a JSON array of products.
#[derive(Debug, Clone)]
pub struct HttpProductFeed {
    url: String,
    http: Client,
}

impl HttpProductFeed {
    /// Create a feed for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }

    /// The endpoint URL this feed reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProductFeed for HttpProductFeed {
    async fn fetch(&self) -> Result<Vec<Product>, FeedError> {
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;

        decode_feed(&body)
    }
}

/// In-memory feed for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProductFeed {
    products: Vec<Product>,
}

impl StaticProductFeed {
    /// Create a feed serving the given products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductFeed for StaticProductFeed {
    async fn fetch(&self) -> Result<Vec<Product>, FeedError> {
        Ok(self.products.clone())
    }
}

fn decode_feed(body: &str) -> Result<Vec<Product>, FeedError> {
    Ok(serde_json::from_str(body)?)
}
