//! # Storefront Checkout
//!
//! A Rust client for a storefront that renders its catalog and product
//! pages as HTML and accepts orders through a form-based checkout.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StoreConfig`] and [`StoreConfigBuilder`]
//! - Catalog listing via [`StoreClient::list_product_urls`]
//! - Product scraping (name, price, styles, sizes) via [`StoreClient::get_product_info`]
//! - Add-to-cart, checkout and order submission via [`StoreClient::buy_product`]
//! - Progress reporting through [`observer::PurchaseObserver`]
//! - Scheduling and fixed-interval retry helpers in [`drivers`]
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_checkout::{StoreConfig, StoreUrl};
//!
//! let config = StoreConfig::builder()
//!     .base_url(StoreUrl::new("http://some-website").unwrap())
//!     .catalog_path("/shop/all/jackets")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.catalog_path(), "/shop/all/jackets");
//! ```
//!
//! ## Buying a Product
//!
//! ```rust,ignore
//! use storefront_checkout::{PurchaseRequest, StoreClient, UserInfo};
//!
//! let client = StoreClient::new(config)?;
//!
//! let user_info: UserInfo = [
//!     ("order[billing_name]", "Jane Doe"),
//!     ("order[email]", "jane@example.com"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let request = PurchaseRequest::new("/shop/skate/teiunwfb3", user_info).size("129");
//! if let Some(order) = client.buy_product(&request).await? {
//!     println!("{}", order.order_info);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration is validated on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Fresh reads**: Every operation fetches the live pages; nothing is cached
//! - **No hidden retries**: A request is sent once; retrying is left to [`drivers`]

pub mod clients;
pub mod config;
pub mod drivers;
pub mod error;
pub mod observer;
pub mod parse;
pub mod store;

// Re-export public types at crate root for convenience
pub use config::{StoreConfig, StoreConfigBuilder, StoreUrl};
pub use error::{ConfigError, StoreError};
pub use store::{
    OrderResult, ProductInfo, PurchaseRequest, SizeKey, SizeMap, StoreClient, StyleInfo,
    StyleKey, StyleMap, UserInfo,
};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

pub use observer::{PurchaseEvent, PurchaseObserver, TracingObserver};
pub use parse::{HtmlPageParser, PageParser, ScrapeError};
