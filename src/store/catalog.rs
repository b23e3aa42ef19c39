use super::StoreClient;
use crate::error::StoreError;
use crate::observer::PurchaseEvent;

impl StoreClient {
    /// Returns the product links listed on a catalog page, in page order.
    ///
    /// `catalog` may be absolute or site-relative; `None` lists the configured
    /// default catalog (`/shop/all`). Only the fetched page is read, there is
    /// no pagination.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on network errors or non-2xx responses and
    /// [`StoreError::Scrape`] if the page has no product grid.
    pub async fn list_product_urls(&self, catalog: Option<&str>) -> Result<Vec<String>, StoreError> {
        let path = catalog.unwrap_or_else(|| self.config.catalog_path());
        let url = self.config.base_url().join(path);

        self.notify(PurchaseEvent::FetchingCatalog { url: url.clone() });
        let html = Self::fetch_page(&self.pages, &url).await?;
        let urls = self.parser.catalog_links(&html)?;
        self.notify(PurchaseEvent::CatalogFetched {
            url,
            count: urls.len(),
        });

        Ok(urls)
    }
}
