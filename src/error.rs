//! Error types for the storefront client.
//!
//! This module contains the configuration error type and the unified
//! [`StoreError`] returned by every [`StoreClient`](crate::StoreClient)
//! operation.
//!
//! # Error Handling
//!
//! Store operations distinguish two tiers of failure:
//!
//! - **Hard errors** (network failures, non-2xx responses, markup the site
//!   contract guarantees but the page lacks) are returned as `Err(StoreError)`.
//! - **Business failures** (style or size not offered, product not
//!   purchasable, order rejected by the site) are returned as `Ok(None)` and
//!   reported through the configured
//!   [`PurchaseObserver`](crate::observer::PurchaseObserver).
//!
//! # Example
//!
//! ```rust
//! use storefront_checkout::{ConfigError, StoreUrl};
//!
//! let result = StoreUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidStoreUrl { .. })));
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::parse::ScrapeError;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Store URL is invalid.
    #[error("Invalid store URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://shop.example.com').")]
    InvalidStoreUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A configured path does not start with a slash.
    #[error("Invalid path '{path}' for '{field}'. Paths must be site-relative and start with '/'.")]
    InvalidPath {
        /// The builder field the path was given for.
        field: &'static str,
        /// The invalid path.
        path: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Why construction failed.
        reason: String,
    },
}

/// Unified error type for storefront operations.
///
/// Only unexpected failures end up here. Expected outcomes such as a sold
/// out size are not errors; see the module documentation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An HTTP error (network failure or non-2xx response).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A page did not contain the markup the site is expected to serve.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// A client for the checkout session could not be created.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The checkout endpoint returned a body that is not valid JSON.
    #[error("Failed to decode checkout response: {0}")]
    Decode(#[from] serde_json::Error),
}
