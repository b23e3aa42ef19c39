//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use storefront_checkout::observer::{PurchaseEvent, PurchaseObserver};
use storefront_checkout::{StoreClient, StoreConfig, StoreUrl, UserInfo};
use wiremock::MockServer;

/// Observer that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PurchaseEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<PurchaseEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<PurchaseEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl PurchaseObserver for RecordingObserver {
    fn on_event(&self, event: &PurchaseEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Creates a client for the mock server and the observer attached to it.
pub fn client_for(server: &MockServer) -> (StoreClient, Arc<RecordingObserver>) {
    let config = StoreConfig::builder()
        .base_url(StoreUrl::new(&server.uri()).unwrap())
        .build()
        .unwrap();
    let observer = Arc::new(RecordingObserver::default());
    let client = StoreClient::new(config)
        .unwrap()
        .with_observer(Arc::clone(&observer));
    (client, observer)
}

pub fn user_info() -> UserInfo {
    [
        ("order[billing_name]", "Jane Doe"),
        ("order[email]", "jane@example.com"),
    ]
    .into_iter()
    .collect()
}

pub fn catalog_page(links: &[&str]) -> String {
    let articles: String = links
        .iter()
        .map(|href| format!(r#"<article><a href="{href}"><img alt=""></a></article>"#))
        .collect();
    format!(r#"<html><body><div id="container">{articles}</div></body></html>"#)
}

/// A style entry: name, href, sold out.
pub type Style<'a> = (&'a str, &'a str, bool);

/// A product page with a style list, a size select and optionally a cart form.
pub fn product_page(styles: &[Style<'_>], sizes: &[(&str, &str)], cart: Option<&str>) -> String {
    let items: String = styles
        .iter()
        .enumerate()
        .map(|(i, (name, href, sold_out))| {
            format!(
                r#"<li><a href="{href}" data-style-id="{id}" data-style-name="{name}" data-sold-out="{sold_out}">{name}</a></li>"#,
                id = 21000 + i
            )
        })
        .collect();
    let options: String = sizes
        .iter()
        .map(|(label, value)| format!(r#"<option value="{value}">{label}</option>"#))
        .collect();
    let form = cart.map_or_else(String::new, |action| {
        format!(
            r#"<form id="cart-addf" action="{action}"><select id="size" name="s">{options}</select></form>"#
        )
    });
    format!(
        r#"<html><body>
        <h1 class="protect">Hooded Work Jacket</h1>
        <p class="price"><span itemprop="price">$198</span></p>
        <ul class="styles">{items}</ul>
        {form}
        </body></html>"#
    )
}

pub fn checkout_page(token: &str) -> String {
    format!(
        r#"<html><body><form action="/checkout" method="post">
        <input type="hidden" name="authenticity_token" value="{token}">
        </form></body></html>"#
    )
}
