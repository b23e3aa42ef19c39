//! Configuration types for the storefront client.
//!
//! # Overview
//!
//! - [`StoreConfig`]: The configuration struct holding all client settings
//! - [`StoreConfigBuilder`]: A builder for constructing [`StoreConfig`] instances
//! - [`StoreUrl`]: A validated storefront base URL
//!
//! # Example
//!
//! ```rust
//! use storefront_checkout::{StoreConfig, StoreUrl};
//!
//! let config = StoreConfig::builder()
//!     .base_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .user_agent_prefix("MyBot/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.catalog_path(), "/shop/all");
//! ```

mod newtypes;

pub use newtypes::StoreUrl;

use std::time::Duration;

use crate::error::ConfigError;

/// Default catalog listing, covering every product on the site.
pub const DEFAULT_CATALOG_PATH: &str = "/shop/all";

/// Default checkout page holding the authenticity token.
pub const DEFAULT_CHECKOUT_PATH: &str = "/checkout";

/// Default JSON endpoint the checkout form is submitted to.
pub const DEFAULT_CHECKOUT_SUBMIT_PATH: &str = "/checkout.json";

/// Configuration for a [`StoreClient`](crate::StoreClient).
///
/// `StoreConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    base_url: StoreUrl,
    user_agent_prefix: Option<String>,
    catalog_path: String,
    checkout_path: String,
    checkout_submit_path: String,
    timeout: Option<Duration>,
}

impl StoreConfig {
    /// Creates a new builder for constructing a `StoreConfig`.
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Returns the storefront base URL.
    #[must_use]
    pub const fn base_url(&self) -> &StoreUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the catalog path listed when none is given explicitly.
    #[must_use]
    pub fn catalog_path(&self) -> &str {
        &self.catalog_path
    }

    /// Returns the checkout page path.
    #[must_use]
    pub fn checkout_path(&self) -> &str {
        &self.checkout_path
    }

    /// Returns the checkout submission path.
    #[must_use]
    pub fn checkout_submit_path(&self) -> &str {
        &self.checkout_submit_path
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify StoreConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreConfig>();
};

/// Builder for constructing [`StoreConfig`] instances.
///
/// `base_url` is required. All other fields have sensible defaults.
///
/// # Defaults
///
/// - `catalog_path`: `/shop/all`
/// - `checkout_path`: `/checkout`
/// - `checkout_submit_path`: `/checkout.json`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no timeout beyond the HTTP stack's own)
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    base_url: Option<StoreUrl>,
    user_agent_prefix: Option<String>,
    catalog_path: Option<String>,
    checkout_path: Option<String>,
    checkout_submit_path: Option<String>,
    timeout: Option<Duration>,
}

impl StoreConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storefront base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: StoreUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default catalog path.
    #[must_use]
    pub fn catalog_path(mut self, path: impl Into<String>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Sets the checkout page path.
    #[must_use]
    pub fn checkout_path(mut self, path: impl Into<String>) -> Self {
        self.checkout_path = Some(path.into());
        self
    }

    /// Sets the checkout submission path.
    #[must_use]
    pub fn checkout_submit_path(mut self, path: impl Into<String>) -> Self {
        self.checkout_submit_path = Some(path.into());
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`StoreConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::InvalidPath`] if a configured path is not site-relative.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let catalog_path = site_path(
            "catalog_path",
            self.catalog_path,
            DEFAULT_CATALOG_PATH,
        )?;
        let checkout_path = site_path(
            "checkout_path",
            self.checkout_path,
            DEFAULT_CHECKOUT_PATH,
        )?;
        let checkout_submit_path = site_path(
            "checkout_submit_path",
            self.checkout_submit_path,
            DEFAULT_CHECKOUT_SUBMIT_PATH,
        )?;

        Ok(StoreConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            catalog_path,
            checkout_path,
            checkout_submit_path,
            timeout: self.timeout,
        })
    }
}

fn site_path(
    field: &'static str,
    path: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match path {
        None => Ok(default.to_string()),
        Some(path) if path.starts_with('/') => Ok(path),
        Some(path) => Err(ConfigError::InvalidPath { field, path }),
    }
}
