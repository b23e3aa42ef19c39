//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type for accessing the status
//! and raw body of a storefront response.

use serde::de::DeserializeOwned;

/// An HTTP response from the storefront.
///
/// Pages are HTML, so the body is kept as text; use [`HttpResponse::json`]
/// for the endpoints that answer with JSON.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, body: String) -> Self {
        Self { code, body }
    }

    /// Returns `true` if the response has a 2xx status code.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
