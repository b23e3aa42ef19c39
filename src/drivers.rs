//! Scheduling helpers built on top of [`StoreClient`].
//!
//! The client itself never retries and never waits. The helpers here own
//! those policies for callers that want them:
//!
//! - [`product_url_at`]: pick a product by its position on a catalog page
//! - [`buy_at`]: wait until a wall-clock time, then buy once
//! - [`buy_until_success`]: repeat the whole flow at a fixed interval
//!
//! Retries use a fixed interval with no backoff or jitter. Hard errors are
//! never retried; they end the loop and are returned to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use storefront_checkout::drivers::{buy_until_success, PlannedPurchase, ProductSelector, RetryPolicy};
//!
//! let plan = PlannedPurchase::new(ProductSelector::catalog_index("/shop/all/tops_sweaters", 21), user_info)
//!     .style("White")
//!     .size("XLarge");
//!
//! let order = buy_until_success(&client, &RetryPolicy::default(), &plan).await?;
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::store::{OrderResult, PurchaseRequest, StoreClient, UserInfo};

/// Interval between two purchase attempts unless configured otherwise.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// How often [`buy_at`] checks the clock unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Returns the link of the `number`-th product (1-based) on a catalog page.
///
/// Returns `Ok(None)` when the page lists fewer products.
///
/// # Errors
///
/// Propagates errors of [`StoreClient::list_product_urls`].
pub async fn product_url_at(
    client: &StoreClient,
    catalog: Option<&str>,
    number: usize,
) -> Result<Option<String>, StoreError> {
    let urls = client.list_product_urls(catalog).await?;
    let url = number
        .checked_sub(1)
        .and_then(|index| urls.into_iter().nth(index));
    if url.is_none() {
        tracing::warn!(number, "Catalog does not list that many products");
    }
    Ok(url)
}

/// How the product to buy is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductSelector {
    /// A fixed product URL.
    Url(String),
    /// The `number`-th product (1-based) of a catalog page, looked up on every attempt.
    CatalogIndex {
        /// Catalog path, `None` for the configured default.
        catalog: Option<String>,
        /// 1-based position on the page.
        number: usize,
    },
}

impl ProductSelector {
    /// Selects a product by URL.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Selects a product by its position on a catalog page.
    #[must_use]
    pub fn catalog_index(catalog: impl Into<String>, number: usize) -> Self {
        Self::CatalogIndex {
            catalog: Some(catalog.into()),
            number,
        }
    }
}

/// A purchase whose product URL is resolved when the attempt runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedPurchase {
    /// How to find the product.
    pub product: ProductSelector,
    /// Style name, if any.
    pub style: Option<String>,
    /// Size label, if any.
    pub size: Option<String>,
    /// Checkout form fields.
    pub user_info: UserInfo,
}

impl PlannedPurchase {
    /// Creates a plan without style or size selectors.
    #[must_use]
    pub const fn new(product: ProductSelector, user_info: UserInfo) -> Self {
        Self {
            product,
            style: None,
            size: None,
            user_info,
        }
    }

    /// Selects a style.
    #[must_use]
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Selects a size.
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Resolves the product URL and builds the request for one attempt.
    ///
    /// # Errors
    ///
    /// Propagates catalog listing errors.
    pub async fn resolve(&self, client: &StoreClient) -> Result<Option<PurchaseRequest>, StoreError> {
        let product_url = match &self.product {
            ProductSelector::Url(url) => Some(url.clone()),
            ProductSelector::CatalogIndex { catalog, number } => {
                product_url_at(client, catalog.as_deref(), *number).await?
            }
        };

        Ok(product_url.map(|url| PurchaseRequest {
            product_url: url,
            style: self.style.clone(),
            size: self.size.clone(),
            user_info: self.user_info.clone(),
        }))
    }

    async fn attempt(&self, client: &StoreClient) -> Result<Option<OrderResult>, StoreError> {
        match self.resolve(client).await? {
            Some(request) => client.buy_product(&request).await,
            None => Ok(None),
        }
    }
}

/// Fixed-interval retry settings for [`buy_until_success`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Time to sleep between attempts.
    pub interval: Duration,
    /// Maximum number of attempts, `None` to retry forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RETRY_INTERVAL,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy retrying forever at `interval`.
    #[must_use]
    pub const fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Caps the number of attempts.
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}

/// Runs the purchase flow until an order is placed.
///
/// Between two unsuccessful attempts the task sleeps for `policy.interval`.
/// Returns `Ok(None)` only if `policy.max_attempts` is exhausted.
///
/// # Errors
///
/// Returns the first hard error; hard errors are not retried.
pub async fn buy_until_success(
    client: &StoreClient,
    policy: &RetryPolicy,
    plan: &PlannedPurchase,
) -> Result<Option<OrderResult>, StoreError> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        if let Some(order) = plan.attempt(client).await? {
            tracing::info!(attempt, "Purchase completed");
            return Ok(Some(order));
        }

        if policy.max_attempts.is_some_and(|max| attempt >= max) {
            tracing::warn!(attempt, "Giving up after the last allowed attempt");
            return Ok(None);
        }

        tracing::info!(
            attempt,
            retry_in_secs = policy.interval.as_secs(),
            "Purchase not completed, retrying later"
        );
        tokio::time::sleep(policy.interval).await;
    }
}

/// Waits until `at`, checking the clock every `poll`, then attempts the purchase once.
///
/// A time in the past starts the purchase immediately.
///
/// # Errors
///
/// Propagates errors of the purchase attempt.
pub async fn buy_at(
    client: &StoreClient,
    at: DateTime<Utc>,
    poll: Duration,
    plan: &PlannedPurchase,
) -> Result<Option<OrderResult>, StoreError> {
    tracing::info!(at = %at, "Waiting for the scheduled purchase time");
    while Utc::now() < at {
        let remaining = (at - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(remaining.min(poll)).await;
    }
    plan.attempt(client).await
}
