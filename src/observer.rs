//! Progress reporting for store operations.
//!
//! Every step of listing, scraping, and buying is reported to a
//! [`PurchaseObserver`] as a [`PurchaseEvent`]. Business failures (style or
//! size not offered, order rejected) are only ever visible through these
//! events, since the operations themselves just return `Ok(None)`.
//!
//! The default [`TracingObserver`] forwards events to `tracing`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use storefront_checkout::observer::{PurchaseEvent, PurchaseObserver};
//!
//! #[derive(Debug, Default)]
//! struct Collect(Mutex<Vec<String>>);
//!
//! impl PurchaseObserver for Collect {
//!     fn on_event(&self, event: &PurchaseEvent) {
//!         self.0.lock().unwrap().push(event.to_string());
//!     }
//! }
//!
//! let observer = Arc::new(Collect::default());
//! observer.on_event(&PurchaseEvent::AddingToCart);
//! assert_eq!(observer.0.lock().unwrap()[0], "Adding the product to the cart...");
//! ```

use std::fmt;
use std::sync::Arc;

/// A step or outcome of a store operation.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseEvent {
    /// A catalog page is about to be fetched.
    FetchingCatalog {
        /// Absolute catalog URL.
        url: String,
    },
    /// A catalog page was parsed.
    CatalogFetched {
        /// Absolute catalog URL.
        url: String,
        /// Number of product links found.
        count: usize,
    },
    /// A product page is about to be fetched.
    FetchingProduct {
        /// Product URL as requested.
        url: String,
    },
    /// A product page was parsed.
    ProductFetched {
        /// Product URL as requested.
        url: String,
        /// Product name.
        name: String,
    },
    /// The product has named styles but none was requested.
    StyleNotSelected {
        /// Product name.
        name: String,
        /// The styles the product offers.
        available: Vec<String>,
    },
    /// The requested style is not offered.
    StyleUnavailable {
        /// Product name.
        name: String,
        /// The requested style.
        style: String,
    },
    /// The product cannot be bought in the requested style and size.
    Unavailable {
        /// Product name.
        name: String,
        /// The requested style, if any.
        style: Option<String>,
        /// The requested size, if any.
        size: Option<String>,
    },
    /// All checks passed; the purchase flow starts.
    Buying {
        /// Product name.
        name: String,
        /// The requested style, if any.
        style: Option<String>,
        /// The requested size, if any.
        size: Option<String>,
        /// Price text.
        price: String,
    },
    /// The cart request is about to be sent.
    AddingToCart,
    /// The product is in the cart.
    AddedToCart,
    /// The checkout page is about to be fetched.
    CheckingOut,
    /// The checkout page yielded an authenticity token.
    CheckedOut,
    /// The order is about to be submitted.
    SubmittingOrder,
    /// The site rejected the order.
    OrderFailed {
        /// Product name.
        name: String,
        /// The requested style, if any.
        style: Option<String>,
        /// The requested size, if any.
        size: Option<String>,
        /// Errors reported by the site.
        errors: serde_json::Value,
    },
    /// The order was accepted.
    OrderPlaced {
        /// Product name.
        name: String,
        /// The requested style, if any.
        style: Option<String>,
        /// The requested size, if any.
        size: Option<String>,
    },
}

impl PurchaseEvent {
    /// Returns `true` for events describing a business failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::StyleNotSelected { .. }
                | Self::StyleUnavailable { .. }
                | Self::Unavailable { .. }
                | Self::OrderFailed { .. }
        )
    }
}

struct Choice<'a>(&'a Option<String>);

impl fmt::Display for Choice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("-"))
    }
}

impl fmt::Display for PurchaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingCatalog { url } => write!(f, "Getting all the product URLs from {url}..."),
            Self::CatalogFetched { url, count } => write!(f, "Found {count} products on {url}"),
            Self::FetchingProduct { url } => write!(f, "Getting info about a product ({url})..."),
            Self::ProductFetched { name, .. } => write!(f, "Got info about \"{name}\""),
            Self::StyleNotSelected { available, .. } => write!(
                f,
                "There are {available:?} styles, but none selected. Please, specify a style."
            ),
            Self::StyleUnavailable { name, style } => write!(
                f,
                "There is no available product \"{name}\" in style \"{style}\""
            ),
            Self::Unavailable { name, style, size } => write!(
                f,
                "Product \"{name}\" (Style: {}, Size: {}) is not available.",
                Choice(style),
                Choice(size)
            ),
            Self::Buying {
                name,
                style,
                size,
                price,
            } => write!(
                f,
                "Product \"{name}\" (Style: {}, Size: {}, Price: {price}) is going to be bought...",
                Choice(style),
                Choice(size)
            ),
            Self::AddingToCart => f.write_str("Adding the product to the cart..."),
            Self::AddedToCart => f.write_str("Product added to the cart"),
            Self::CheckingOut => f.write_str("Checking out the cart..."),
            Self::CheckedOut => f.write_str("Checkout page loaded"),
            Self::SubmittingOrder => f.write_str("Finishing the purchase..."),
            Self::OrderFailed {
                name,
                style,
                size,
                errors,
            } => write!(
                f,
                "Product \"{name}\" (Style: {}, Size: {}) could not be bought: {errors}",
                Choice(style),
                Choice(size)
            ),
            Self::OrderPlaced { name, style, size } => write!(
                f,
                "Product \"{name}\" (Style: {}, Size: {}) has been bought!",
                Choice(style),
                Choice(size)
            ),
        }
    }
}

/// Receives progress events from a [`StoreClient`](crate::StoreClient).
///
/// Observers are called synchronously, in step order.
pub trait PurchaseObserver: Send + Sync + fmt::Debug {
    /// Handles one event.
    fn on_event(&self, event: &PurchaseEvent);
}

impl<T: PurchaseObserver + ?Sized> PurchaseObserver for Arc<T> {
    fn on_event(&self, event: &PurchaseEvent) {
        (**self).on_event(event);
    }
}

/// Logs every event through `tracing`.
///
/// Failures are logged at `WARN`, everything else at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PurchaseObserver for TracingObserver {
    fn on_event(&self, event: &PurchaseEvent) {
        match event {
            PurchaseEvent::OrderFailed { errors, .. } => {
                tracing::warn!(errors = %errors, "{event}");
            }
            PurchaseEvent::OrderPlaced { name, .. } => {
                tracing::info!(product = %name, "{event}");
            }
            _ if event.is_failure() => tracing::warn!("{event}"),
            _ => tracing::info!("{event}"),
        }
    }
}
