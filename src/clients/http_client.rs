//! HTTP client for storefront communication.
//!
//! This module provides the [`HttpClient`] type for fetching storefront pages
//! and submitting forms.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{StoreConfig, StoreUrl};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the storefront.
///
/// The client handles:
/// - Resolving site-relative URLs against the store base URL
/// - Default headers including User-Agent
/// - Mapping non-2xx responses to [`HttpResponseError`]
///
/// Two flavours exist. [`HttpClient::new`] creates a stateless client used
/// for page scraping. [`HttpClient::session`] creates a client with its own
/// cookie jar; every session starts empty, so cookies never leak between
/// two sessions.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_checkout::{StoreConfig, StoreUrl};
/// use storefront_checkout::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = StoreConfig::builder()
///     .base_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "/shop/all").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL site-relative requests are resolved against.
    base_url: StoreUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Whether this client keeps a cookie jar.
    keeps_cookies: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a stateless client that does not retain cookies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        Self::build(config, false)
    }

    /// Creates a client with a fresh cookie jar shared by all its requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created.
    pub fn session(config: &StoreConfig) -> Result<Self, ConfigError> {
        Self::build(config, true)
    }

    fn build(config: &StoreConfig, keeps_cookies: bool) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Storefront Checkout v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(keeps_cookies);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            keeps_cookies,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &StoreUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns `true` if this client keeps cookies between requests.
    #[must_use]
    pub const fn keeps_cookies(&self) -> bool {
        self.keeps_cookies
    }

    /// Sends an HTTP request to the storefront.
    ///
    /// Requests are attempted exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.url);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        tracing::debug!(method = %request.http_method, url = %url, "Sending storefront request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(form) = &request.form {
            req_builder = req_builder.form(form);
        }

        let res = req_builder.send().await?;

        let status = res.status();
        let code = status.as_u16();
        let body = res.text().await?;

        let response = HttpResponse::new(code, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(status = code, url = %url, "Storefront request failed");

        Err(HttpError::Response(HttpResponseError {
            code,
            url,
            message: status
                .canonical_reason()
                .map_or_else(|| Self::body_excerpt(&response.body), String::from),
        }))
    }

    fn body_excerpt(body: &str) -> String {
        body.chars().take(200).collect()
    }
}
