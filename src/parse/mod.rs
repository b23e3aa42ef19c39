//! Page parsing for storefront markup.
//!
//! The [`PageParser`] trait is the seam between HTTP and markup: it turns a
//! page body into plain records ([`ProductPage`], catalog links, the checkout
//! authenticity token). Business rules such as which style gets its sizes
//! recorded live in [`StoreClient`](crate::StoreClient), not in parsers.
//!
//! [`HtmlPageParser`] is the default implementation, built on the `scraper`
//! crate. Alternative parsers can be plugged in with
//! [`StoreClient::with_parser`](crate::StoreClient::with_parser).

mod html;

pub use html::HtmlPageParser;

use std::fmt;

use thiserror::Error;

use crate::store::SizeMap;

/// Errors raised when a page lacks markup the site always serves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// No element matched the selector.
    #[error("Expected element '{selector}' was not found on the page.")]
    MissingElement {
        /// The CSS selector that matched nothing.
        selector: String,
    },

    /// An element was found without a required attribute.
    #[error("Element '{selector}' has no '{attribute}' attribute.")]
    MissingAttribute {
        /// The CSS selector of the element.
        selector: String,
        /// The missing attribute.
        attribute: String,
    },

    /// A selector could not be compiled.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector source.
        selector: String,
        /// Why it failed to compile.
        reason: String,
    },
}

/// One entry of a product's style list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleLink {
    /// The `data-style-id` value, if present.
    pub id: Option<String>,
    /// The `data-style-name` value, as displayed.
    pub name: String,
    /// Link to the page of this style.
    pub href: String,
    /// Whether `data-sold-out` is `"true"`.
    pub sold_out: bool,
}

/// Raw facts scraped from a product page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductPage {
    /// Product name.
    pub name: String,
    /// Price text.
    pub price: String,
    /// Entries of the style list, `None` when the page has no style list.
    pub style_links: Option<Vec<StyleLink>>,
    /// Value of the single-style id input: `None` when the input is absent,
    /// `Some(None)` when it is present without a value.
    pub style_input: Option<Option<String>>,
    /// Sizes offered by the page's size control, empty when there is none.
    pub sizes: SizeMap,
    /// Action of the add-to-cart form, if the page has one.
    pub cart_action: Option<String>,
}

/// Extracts storefront records from page markup.
///
/// Implementations must be stateless with respect to the pages they parse;
/// the client may call them for any page in any order.
pub trait PageParser: Send + Sync + fmt::Debug {
    /// Returns one link per product listed on a catalog page, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the product grid is missing or a listed
    /// product has no link.
    fn catalog_links(&self, html: &str) -> Result<Vec<String>, ScrapeError>;

    /// Extracts the facts of a product page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the name, the price, or a required style
    /// attribute is missing.
    fn product_page(&self, html: &str) -> Result<ProductPage, ScrapeError>;

    /// Extracts the CSRF token from the checkout page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the token input or its value is missing.
    fn authenticity_token(&self, html: &str) -> Result<String, ScrapeError>;
}
