//! Integration tests for `StoreClient` against a mock storefront.
//!
//! These tests cover catalog listing, product scraping, and the complete
//! add-to-cart, checkout, and order submission flow.

mod common;

use common::{catalog_page, checkout_page, client_for, product_page, user_info};
use serde_json::json;
use storefront_checkout::observer::PurchaseEvent;
use storefront_checkout::{
    HttpError, PurchaseRequest, ScrapeError, SizeKey, StoreError, StyleKey,
};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JACKET_RED: &str = "/shop/jackets/vx7afr3kd/red";
const JACKET_BLUE: &str = "/shop/jackets/vx7afr3kd/blue";
const CART: &str = "/shop/171000/add";

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn red_jacket_page() -> String {
    product_page(
        &[("Red", JACKET_RED, false), ("Blue", JACKET_BLUE, false)],
        &[("Medium", "13"), ("Large", "14")],
        Some(CART),
    )
}

// === Catalog ===

#[tokio::test]
async fn test_list_product_urls_preserves_page_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/shop/all/jackets",
        catalog_page(&["/shop/jackets/c", "/shop/jackets/a", "/shop/jackets/b"]),
    )
    .await;
    let (client, observer) = client_for(&server);

    let urls = client
        .list_product_urls(Some("/shop/all/jackets"))
        .await
        .unwrap();

    assert_eq!(
        urls,
        vec!["/shop/jackets/c", "/shop/jackets/a", "/shop/jackets/b"]
    );
    assert!(matches!(
        observer.last(),
        Some(PurchaseEvent::CatalogFetched { count: 3, .. })
    ));
}

#[tokio::test]
async fn test_list_product_urls_defaults_to_whole_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/all"))
        .respond_with(html(catalog_page(&["/shop/skate/teiunwfb3"])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let urls = client.list_product_urls(None).await.unwrap();

    assert_eq!(urls, vec!["/shop/skate/teiunwfb3"]);
}

#[tokio::test]
async fn test_empty_catalog_grid_lists_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, "/shop/all", catalog_page(&[])).await;
    let (client, _) = client_for(&server);

    assert!(client.list_product_urls(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_http_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/all"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let result = client.list_product_urls(None).await;

    match result {
        Err(StoreError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 503);
            assert!(e.url.ends_with("/shop/all"));
        }
        other => panic!("Expected HTTP 503 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_catalog_without_grid_is_scrape_error() {
    let server = MockServer::start().await;
    mount_page(&server, "/shop/all", "<html><body>Closed</body></html>".to_string()).await;
    let (client, _) = client_for(&server);

    let result = client.list_product_urls(None).await;

    assert!(matches!(
        result,
        Err(StoreError::Scrape(ScrapeError::MissingElement { .. }))
    ));
}

// === Product info ===

#[tokio::test]
async fn test_get_product_info_scrapes_current_style_sizes() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    let (client, _) = client_for(&server);

    let info = client.get_product_info(JACKET_RED).await.unwrap();

    assert_eq!(info.name, "Hooded Work Jacket");
    assert_eq!(info.price, "$198");
    assert_eq!(info.cart_url.as_deref(), Some(CART));
    assert_eq!(info.styles.len(), 2);

    let red = info.styles.get(&StyleKey::named("RED")).unwrap();
    assert_eq!(red.id.as_deref(), Some("21000"));
    assert_eq!(red.size_value(&SizeKey::named("large")), Some("14"));

    let blue = info.styles.get(&StyleKey::named("blue")).unwrap();
    assert!(blue.sizes.is_none());
}

#[tokio::test]
async fn test_get_product_info_accepts_absolute_url() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    let (client, _) = client_for(&server);

    let info = client
        .get_product_info(&format!("{}{JACKET_RED}", server.uri()))
        .await
        .unwrap();

    assert_eq!(info.name, "Hooded Work Jacket");
}

#[tokio::test]
async fn test_product_without_name_is_scrape_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        JACKET_RED,
        r#"<p class="price"><span>$10</span></p>"#.to_string(),
    )
    .await;
    let (client, _) = client_for(&server);

    let result = client.get_product_info(JACKET_RED).await;

    match result {
        Err(StoreError::Scrape(ScrapeError::MissingElement { selector })) => {
            assert_eq!(selector, "h1.protect");
        }
        other => panic!("Expected missing product name, got: {other:?}"),
    }
}

// === Purchase: business failures ===

#[tokio::test]
async fn test_buy_unknown_style_reports_and_returns_none() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Green")
        .size("Large");
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    assert_eq!(
        observer.last(),
        Some(PurchaseEvent::StyleUnavailable {
            name: "Hooded Work Jacket".to_string(),
            style: "Green".to_string(),
        })
    );
}

#[tokio::test]
async fn test_buy_without_style_on_multi_style_product_lists_styles() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info()).size("Large");
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    match observer.last() {
        Some(PurchaseEvent::StyleNotSelected { available, .. }) => {
            assert_eq!(available, vec!["red", "blue"]);
        }
        other => panic!("Expected StyleNotSelected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_buy_unknown_size_returns_none_without_posting() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("red")
        .size("XXLarge");
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    assert!(matches!(
        observer.last(),
        Some(PurchaseEvent::Unavailable { .. })
    ));
}

#[tokio::test]
async fn test_buy_other_style_fetches_its_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JACKET_RED))
        .respond_with(html(red_jacket_page()))
        .expect(1)
        .mount(&server)
        .await;
    // The blue page has no cart form: the style is listed but cannot be added.
    Mock::given(method("GET"))
        .and(path(JACKET_BLUE))
        .respond_with(html(product_page(
            &[("Red", JACKET_RED, false), ("Blue", JACKET_BLUE, false)],
            &[],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Blue")
        .size("Large");
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    let fetched: Vec<String> = observer
        .events()
        .into_iter()
        .filter_map(|event| match event {
            PurchaseEvent::FetchingProduct { url } => Some(url),
            _ => None,
        })
        .collect();
    assert_eq!(fetched, vec![JACKET_RED, JACKET_BLUE]);
}

#[tokio::test]
async fn test_buy_sold_out_single_style_product_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/skate/teiunwfb3"))
        .respond_with(html(
            r#"<h1 class="protect">Deck</h1><p class="price"><span>$58</span></p>
               <b class="button sold-out">sold out</b>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new("/shop/skate/teiunwfb3", user_info());
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    assert_eq!(
        observer.last(),
        Some(PurchaseEvent::Unavailable {
            name: "Deck".to_string(),
            style: None,
            size: None,
        })
    );
}

// === Purchase: checkout ===

async fn mount_checkout(server: &MockServer, order_response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(CART))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(body_string_contains("style=21000"))
        .and(body_string_contains("size=14"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "cart=1; path=/")
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(server)
        .await;

    // The checkout page only renders for a session with a cart cookie.
    Mock::given(method("GET"))
        .and(path("/checkout"))
        .and(header("cookie", "cart=1"))
        .respond_with(html(checkout_page("tok3n")))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .and(body_string_contains("authenticity_token=tok3n"))
        .and(body_string_contains("order%5Bterms%5D=1"))
        .and(body_string_contains("order%5Bbilling_name%5D=Jane+Doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_buy_product_completes_checkout() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    mount_checkout(&server, json!({"status": "queued", "slug": "abc123"})).await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("RED")
        .size("large");
    let order = client.buy_product(&request).await.unwrap().unwrap();

    assert_eq!(order.order_info["status"], "queued");
    assert_eq!(order.product_info.name, "Hooded Work Jacket");

    let events = observer.events();
    let position = |wanted: &PurchaseEvent| events.iter().position(|e| e == wanted).unwrap();
    assert!(position(&PurchaseEvent::AddedToCart) < position(&PurchaseEvent::CheckedOut));
    assert!(matches!(
        events.last(),
        Some(PurchaseEvent::OrderPlaced { .. })
    ));
}

#[tokio::test]
async fn test_rejected_order_reports_errors() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    mount_checkout(
        &server,
        json!({"status": "failed", "errors": {"credit_card": ["number is not valid"]}}),
    )
    .await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Large");
    let result = client.buy_product(&request).await.unwrap();

    assert!(result.is_none());
    match observer.last() {
        Some(PurchaseEvent::OrderFailed { errors, .. }) => {
            assert_eq!(errors, json!({"credit_card": ["number is not valid"]}));
        }
        other => panic!("Expected OrderFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_checkout_without_token_is_scrape_error() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_page(&server, "/checkout", "<html><body>Empty cart</body></html>".to_string()).await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Medium");
    let result = client.buy_product(&request).await;

    assert!(matches!(result, Err(StoreError::Scrape(_))));
}

#[tokio::test]
async fn test_cart_http_error_is_returned() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Medium");
    let result = client.buy_product(&request).await;

    match result {
        Err(StoreError::Http(e)) => assert_eq!(e.status(), Some(422)),
        other => panic!("Expected HTTP 422 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_order_response_is_decode_error() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_page(&server, "/checkout", checkout_page("tok3n")).await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Large");
    let result = client.buy_product(&request).await;

    assert!(matches!(result, Err(StoreError::Decode(_))));
}

/// Mounts cart, checkout page and order endpoints that accept anything.
async fn mount_open_checkout(server: &MockServer, cart_path: &str) {
    Mock::given(method("POST"))
        .and(path(cart_path))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(server)
        .await;
    mount_page(server, "/checkout", checkout_page("tok3n")).await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_each_purchase_starts_a_fresh_cookie_session() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    // A cart request carrying a cookie would mean a previous session leaked.
    Mock::given(method("POST"))
        .and(path(CART))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "cart=1; path=/")
                .set_body_string("{}"),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checkout"))
        .and(header("cookie", "cart=1"))
        .respond_with(html(checkout_page("tok3n")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .expect(2)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Large");
    let first = client.buy_product(&request).await.unwrap();
    let second = client.buy_product(&request).await.unwrap();

    assert!(first.is_some());
    assert!(second.is_some());
}

#[tokio::test]
async fn test_buy_other_style_uses_its_own_page() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    mount_page(
        &server,
        JACKET_BLUE,
        product_page(
            &[("Red", JACKET_RED, false), ("Blue", JACKET_BLUE, false)],
            &[("Large", "99")],
            Some("/shop/171001/add"),
        ),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/shop/171001/add"))
        .and(body_string_contains("style=21001"))
        .and(body_string_contains("size=99"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_open_checkout(&server, "/shop/171001/add").await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("blue")
        .size("Large");
    let order = client.buy_product(&request).await.unwrap().unwrap();

    assert_eq!(order.order_info["status"], "queued");
    assert_eq!(order.product_info.cart_url.as_deref(), Some("/shop/171001/add"));
}

#[tokio::test]
async fn test_buy_single_style_product_without_selectors() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/shop/skate/teiunwfb3",
        r#"<html><body>
        <h1 class="protect">Independent Truck</h1>
        <p class="price"><span itemprop="price">$56</span></p>
        <form id="cart-addf" action="/shop/172000/add">
            <input type="hidden" id="style" name="st" value="77">
            <input type="hidden" id="size" name="s" value="55">
        </form>
        </body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/shop/172000/add"))
        .and(body_string_contains("style=77"))
        .and(body_string_contains("size=55"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    mount_open_checkout(&server, "/shop/172000/add").await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new("/shop/skate/teiunwfb3", user_info());
    let order = client.buy_product(&request).await.unwrap().unwrap();

    assert_eq!(order.order_info, json!({"status": "queued"}));
    assert!(matches!(
        observer.last(),
        Some(PurchaseEvent::OrderPlaced {
            style: None,
            size: None,
            ..
        })
    ));
}

#[tokio::test]
async fn test_checkout_page_http_error_is_returned() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checkout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Large");
    let result = client.buy_product(&request).await;

    match result {
        Err(StoreError::Http(e)) => assert_eq!(e.status(), Some(500)),
        other => panic!("Expected HTTP 500 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_order_submission_http_error_is_returned() {
    let server = MockServer::start().await;
    mount_page(&server, JACKET_RED, red_jacket_page()).await;
    Mock::given(method("POST"))
        .and(path(CART))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_page(&server, "/checkout", checkout_page("tok3n")).await;
    Mock::given(method("POST"))
        .and(path("/checkout.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let request = PurchaseRequest::new(JACKET_RED, user_info())
        .style("Red")
        .size("Large");
    let result = client.buy_product(&request).await;

    match result {
        Err(StoreError::Http(e)) => assert_eq!(e.status(), Some(503)),
        other => panic!("Expected HTTP 503 error, got: {other:?}"),
    }
    assert_eq!(observer.last(), Some(PurchaseEvent::SubmittingOrder));
}
