//! The storefront client.
//!
//! [`StoreClient`] implements the three storefront operations:
//!
//! - [`StoreClient::list_product_urls`]: product links of a catalog page
//! - [`StoreClient::get_product_info`]: name, price, styles and sizes of a product
//! - [`StoreClient::buy_product`]: add to cart, check out, and submit an order
//!
//! Every call fetches fresh pages; nothing is cached between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_checkout::{PurchaseRequest, StoreClient, StoreConfig, StoreUrl, UserInfo};
//!
//! let config = StoreConfig::builder()
//!     .base_url(StoreUrl::new("http://some-website")?)
//!     .build()?;
//! let client = StoreClient::new(config)?;
//!
//! let urls = client.list_product_urls(Some("/shop/all/tops_sweaters")).await?;
//! let request = PurchaseRequest::new(&urls[20], user_info)
//!     .style("White")
//!     .size("XLarge");
//!
//! match client.buy_product(&request).await? {
//!     Some(order) => println!("{}", serde_json::to_string_pretty(&order)?),
//!     None => eprintln!("The purchase could not be completed."),
//! }
//! ```

mod catalog;
mod product;
mod purchase;
mod types;

pub use types::{
    OrderResult, ProductInfo, PurchaseRequest, SizeKey, SizeMap, StyleInfo, StyleKey, StyleMap,
    UserInfo, VariantMap,
};

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::StoreConfig;
use crate::error::ConfigError;
use crate::observer::{PurchaseEvent, PurchaseObserver, TracingObserver};
use crate::parse::{HtmlPageParser, PageParser};

/// Client for one storefront.
///
/// # Thread Safety
///
/// `StoreClient` is `Send + Sync`. Operations on it are sequential: each
/// request is awaited before the next one is sent.
#[derive(Debug)]
pub struct StoreClient {
    config: StoreConfig,
    /// Stateless client used for page scraping.
    pages: HttpClient,
    parser: Box<dyn PageParser>,
    observer: Arc<dyn PurchaseObserver>,
}

// Verify StoreClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreClient>();
};

impl StoreClient {
    /// Creates a client using [`HtmlPageParser`] and [`TracingObserver`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be created.
    pub fn new(config: StoreConfig) -> Result<Self, ConfigError> {
        let pages = HttpClient::new(&config)?;
        Ok(Self {
            config,
            pages,
            parser: Box::new(HtmlPageParser::new()),
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the page parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl PageParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replaces the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl PurchaseObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn notify(&self, event: PurchaseEvent) {
        self.observer.on_event(&event);
    }

    /// GETs a page with `client` and returns its body.
    async fn fetch_page(client: &HttpClient, url: &str) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, url).build()?;
        Ok(client.request(request).await?.body)
    }
}
