use serde_json::Value;

use super::types::{OrderResult, ProductInfo, PurchaseRequest, SizeKey, StyleKey, UserInfo};
use super::StoreClient;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::error::StoreError;
use crate::observer::PurchaseEvent;

/// `Accept` header sent with the add-to-cart request.
pub const CART_ACCEPT: &str =
    "*/*;q=0.5, text/javascript, application/javascript, application/ecmascript, application/x-ecmascript";

/// Order status the checkout endpoint answers with when it rejects an order.
pub const FAILED_STATUS: &str = "failed";

impl StoreClient {
    /// Buys one product.
    ///
    /// Returns `Ok(None)` when the product cannot be bought as requested
    /// (unknown style, unknown size, nothing to add to the cart) or when the
    /// site rejects the order; the reason is reported to the observer.
    /// Nothing is retried, since a submitted order cannot be taken back.
    ///
    /// The cart and checkout requests share a cookie session created for
    /// this call only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on network errors or non-2xx responses,
    /// [`StoreError::Scrape`] if a page lacks required markup (including the
    /// checkout authenticity token), and [`StoreError::Decode`] if the
    /// checkout endpoint does not answer with JSON.
    pub async fn buy_product(
        &self,
        request: &PurchaseRequest,
    ) -> Result<Option<OrderResult>, StoreError> {
        let mut product_info = self.get_product_info(&request.product_url).await?;
        let style_key = StyleKey::from_selector(request.style.as_deref());

        let Some(mut style_info) = product_info.styles.get(&style_key).cloned() else {
            self.notify(match &request.style {
                None => PurchaseEvent::StyleNotSelected {
                    name: product_info.name,
                    available: product_info.styles.keys().map(ToString::to_string).collect(),
                },
                Some(style) => PurchaseEvent::StyleUnavailable {
                    name: product_info.name,
                    style: style.clone(),
                },
            });
            return Ok(None);
        };

        // Sizes are only known on the style's own page.
        let page_url = self.config.base_url().join(&request.product_url);
        if !page_url.ends_with(&style_info.href) {
            product_info = self.get_product_info(&style_info.href).await?;
            match product_info.styles.get(&style_key) {
                Some(fresh) => style_info = fresh.clone(),
                None => {
                    self.notify_unavailable(&product_info, request);
                    return Ok(None);
                }
            }
        }

        let size_key = SizeKey::from_selector(request.size.as_deref());
        let (Some(cart_url), Some(size_value)) = (
            product_info.cart_url.clone(),
            style_info.size_value(&size_key).map(String::from),
        ) else {
            self.notify_unavailable(&product_info, request);
            return Ok(None);
        };

        self.notify(PurchaseEvent::Buying {
            name: product_info.name.clone(),
            style: request.style.clone(),
            size: request.size.clone(),
            price: product_info.price.clone(),
        });

        let cart_form = vec![
            ("style".to_string(), style_info.id.clone().unwrap_or_default()),
            ("size".to_string(), size_value),
        ];
        let order_info = self
            .checkout(&cart_url, cart_form, &request.user_info)
            .await?;

        if order_info.get("status").and_then(Value::as_str) == Some(FAILED_STATUS) {
            self.notify(PurchaseEvent::OrderFailed {
                name: product_info.name,
                style: request.style.clone(),
                size: request.size.clone(),
                errors: order_info.get("errors").cloned().unwrap_or(order_info),
            });
            return Ok(None);
        }

        self.notify(PurchaseEvent::OrderPlaced {
            name: product_info.name.clone(),
            style: request.style.clone(),
            size: request.size.clone(),
        });

        Ok(Some(OrderResult {
            product_info,
            order_info,
        }))
    }

    /// Runs cart, checkout page and order submission in one cookie session.
    ///
    /// The session is dropped on return, whatever the outcome.
    async fn checkout(
        &self,
        cart_url: &str,
        cart_form: Vec<(String, String)>,
        user_info: &UserInfo,
    ) -> Result<Value, StoreError> {
        let session = HttpClient::session(&self.config)?;

        self.notify(PurchaseEvent::AddingToCart);
        let cart_request = HttpRequest::builder(HttpMethod::Post, cart_url)
            .form(cart_form)
            .header("Accept", CART_ACCEPT)
            .header("X-Requested-With", "XMLHttpRequest")
            .build()
            .map_err(HttpError::from)?;
        session.request(cart_request).await?;
        self.notify(PurchaseEvent::AddedToCart);

        self.notify(PurchaseEvent::CheckingOut);
        let checkout_page = Self::fetch_page(&session, self.config.checkout_path()).await?;
        let authenticity_token = self.parser.authenticity_token(&checkout_page)?;
        self.notify(PurchaseEvent::CheckedOut);

        self.notify(PurchaseEvent::SubmittingOrder);
        let order_request = HttpRequest::builder(HttpMethod::Post, self.config.checkout_submit_path())
            .form(checkout_form(user_info, authenticity_token))
            .build()
            .map_err(HttpError::from)?;
        let response = session.request(order_request).await?;

        Ok(response.json()?)
    }

    fn notify_unavailable(&self, product_info: &ProductInfo, request: &PurchaseRequest) {
        self.notify(PurchaseEvent::Unavailable {
            name: product_info.name.clone(),
            style: request.style.clone(),
            size: request.size.clone(),
        });
    }
}

/// Fields every order submission carries after the caller's own.
const FIXED_CHECKOUT_FIELDS: [&str; 4] = [
    "authenticity_token",
    "same_as_billing_address",
    "store_credit_id",
    "order[terms]",
];

/// Appends the token and the fixed checkout flags to the caller's fields.
///
/// Caller fields keep their order; one named like a fixed field is dropped
/// in favor of the fixed value.
fn checkout_form(user_info: &UserInfo, authenticity_token: String) -> Vec<(String, String)> {
    let fixed_values = [authenticity_token, "1".to_string(), String::new(), "1".to_string()];

    user_info
        .iter()
        .filter(|(field, _)| !FIXED_CHECKOUT_FIELDS.contains(field))
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .chain(
            FIXED_CHECKOUT_FIELDS
                .iter()
                .map(|field| (*field).to_string())
                .zip(fixed_values),
        )
        .collect()
}
