use super::types::{ProductInfo, StyleInfo, StyleKey, StyleMap};
use super::StoreClient;
use crate::error::StoreError;
use crate::observer::PurchaseEvent;
use crate::parse::ProductPage;

impl StoreClient {
    /// Scrapes a product page.
    ///
    /// `product_url` may be absolute or site-relative. Sizes are only
    /// recorded for the style shown on this page (and only if it is not sold
    /// out); other styles keep `sizes == None` because their sizes live on
    /// their own pages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on network errors or non-2xx responses and
    /// [`StoreError::Scrape`] if the page lacks the product name or price.
    pub async fn get_product_info(&self, product_url: &str) -> Result<ProductInfo, StoreError> {
        self.notify(PurchaseEvent::FetchingProduct {
            url: product_url.to_string(),
        });

        let url = self.config.base_url().join(product_url);
        let html = Self::fetch_page(&self.pages, &url).await?;
        let page = self.parser.product_page(&html)?;
        let info = product_info(page, &url);

        self.notify(PurchaseEvent::ProductFetched {
            url: product_url.to_string(),
            name: info.name.clone(),
        });
        Ok(info)
    }
}

/// Applies the storefront's style rules to a scraped page loaded from `page_url`.
pub(super) fn product_info(page: ProductPage, page_url: &str) -> ProductInfo {
    let ProductPage {
        name,
        price,
        style_links,
        style_input,
        sizes,
        cart_action,
    } = page;

    let mut styles = StyleMap::new();
    match (style_links, style_input) {
        (Some(links), _) => {
            for link in links {
                let on_this_page = page_url.ends_with(&link.href) && !link.sold_out;
                styles.insert(
                    StyleKey::named(&link.name),
                    StyleInfo {
                        id: link.id,
                        href: link.href,
                        is_sold_out: link.sold_out,
                        sizes: on_this_page.then(|| sizes.clone()),
                    },
                );
            }
        }
        // No style list and no style id: nothing can be bought.
        (None, None) => styles.insert(
            StyleKey::Default,
            StyleInfo {
                id: None,
                href: page_url.to_string(),
                is_sold_out: true,
                sizes: None,
            },
        ),
        (None, Some(id)) => styles.insert(
            StyleKey::Default,
            StyleInfo {
                id,
                href: page_url.to_string(),
                is_sold_out: false,
                sizes: Some(sizes),
            },
        ),
    }

    ProductInfo {
        name,
        price,
        cart_url: cart_action,
        styles,
    }
}
