//! HTTP client types for storefront communication.
//!
//! This module provides the HTTP layer the [`StoreClient`](crate::StoreClient)
//! is built on.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client, stateless or cookie-preserving
//! - [`HttpRequest`]: A request to be sent to the storefront
//! - [`HttpResponse`]: A response with its raw body
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_checkout::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let session = HttpClient::session(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Post, "/shop/123/add")
//!     .form_field("style", "1")
//!     .form_field("size", "12")
//!     .header("X-Requested-With", "XMLHttpRequest")
//!     .build()?;
//!
//! let response = session.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client never retries. Any non-2xx response is returned as
//! [`HttpError::Response`]; retrying a purchase is left to the caller (see
//! [`crate::drivers`]).

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
