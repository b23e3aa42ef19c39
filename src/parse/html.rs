//! `scraper`-based implementation of [`PageParser`].

use scraper::{ElementRef, Html, Selector};

use super::{PageParser, ProductPage, ScrapeError, StyleLink};
use crate::store::{SizeKey, SizeMap};

const CATALOG_GRID: &str = "div#container";
const CATALOG_ITEM: &str = "article";
const LINK: &str = "a";
const PRODUCT_NAME: &str = "h1.protect";
const PRICE: &str = "p.price";
const PRICE_TEXT: &str = "span";
const STYLE_LIST: &str = "ul.styles";
const STYLE_ITEM: &str = "li";
const STYLE_INPUT: &str = "input#style";
const SIZE_SELECT: &str = "select#size";
const SIZE_OPTION: &str = "option";
const SIZE_INPUT: &str = "input#size";
const CART_FORM: &str = "form#cart-addf";
const AUTHENTICITY_TOKEN: &str = r#"input[name="authenticity_token"]"#;

/// Parses storefront pages with CSS selectors.
///
/// # Example
///
/// ```rust
/// use storefront_checkout::parse::{HtmlPageParser, PageParser};
///
/// let html = r#"<div id="container">
///     <article><a href="/shop/a/1">A</a></article>
///     <article><a href="/shop/b/2">B</a></article>
/// </div>"#;
///
/// let links = HtmlPageParser::new().catalog_links(html).unwrap();
/// assert_eq!(links, vec!["/shop/a/1", "/shop/b/2"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlPageParser;

impl HtmlPageParser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PageParser for HtmlPageParser {
    fn catalog_links(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let document = Html::parse_document(html);
        let grid = first(document.root_element(), CATALOG_GRID)?
            .ok_or_else(|| missing_element(CATALOG_GRID))?;

        let item_selector = selector(CATALOG_ITEM)?;
        grid.select(&item_selector)
            .map(|article| {
                let link = first(article, LINK)?.ok_or_else(|| missing_element(LINK))?;
                required_attr(link, LINK, "href")
            })
            .collect()
    }

    fn product_page(&self, html: &str) -> Result<ProductPage, ScrapeError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let name = first(root, PRODUCT_NAME)?
            .map(text)
            .ok_or_else(|| missing_element(PRODUCT_NAME))?;

        let price_box = first(root, PRICE)?.ok_or_else(|| missing_element(PRICE))?;
        let price = first(price_box, PRICE_TEXT)?
            .map(text)
            .ok_or_else(|| missing_element(&format!("{PRICE} {PRICE_TEXT}")))?;

        let style_links = match first(root, STYLE_LIST)? {
            Some(list) => Some(style_links(list)?),
            None => None,
        };

        let style_input = first(root, STYLE_INPUT)?
            .map(|input| input.value().attr("value").map(String::from));

        let cart_action = first(root, CART_FORM)?
            .and_then(|form| form.value().attr("action").map(String::from));

        Ok(ProductPage {
            name,
            price,
            style_links,
            style_input,
            sizes: sizes(root)?,
            cart_action,
        })
    }

    fn authenticity_token(&self, html: &str) -> Result<String, ScrapeError> {
        let document = Html::parse_document(html);
        let input = first(document.root_element(), AUTHENTICITY_TOKEN)?
            .ok_or_else(|| missing_element(AUTHENTICITY_TOKEN))?;
        required_attr(input, AUTHENTICITY_TOKEN, "value")
    }
}

fn style_links(list: ElementRef<'_>) -> Result<Vec<StyleLink>, ScrapeError> {
    let item_selector = selector(STYLE_ITEM)?;
    let link_path = format!("{STYLE_LIST} {STYLE_ITEM} {LINK}");

    list.select(&item_selector)
        .map(|item| {
            let link = first(item, LINK)?.ok_or_else(|| missing_element(&link_path))?;
            let attrs = link.value();
            Ok(StyleLink {
                id: attrs.attr("data-style-id").map(String::from),
                name: required_attr(link, &link_path, "data-style-name")?,
                href: required_attr(link, &link_path, "href")?,
                sold_out: attrs.attr("data-sold-out") == Some("true"),
            })
        })
        .collect()
}

/// A size `<select>` wins over a hidden size input; neither yields no sizes.
fn sizes(root: ElementRef<'_>) -> Result<SizeMap, ScrapeError> {
    if let Some(select) = first(root, SIZE_SELECT)? {
        let option_selector = selector(SIZE_OPTION)?;
        return Ok(select
            .select(&option_selector)
            .map(|option| {
                let label = text(option);
                // Options without a value submit their text.
                let value = option
                    .value()
                    .attr("value")
                    .map_or_else(|| label.clone(), String::from);
                (SizeKey::named(&label), value)
            })
            .collect());
    }

    let mut sizes = SizeMap::new();
    if let Some(input) = first(root, SIZE_INPUT)? {
        let value = input.value().attr("value").unwrap_or_default();
        sizes.insert(SizeKey::Default, value.to_string());
    }
    Ok(sizes)
}

fn selector(source: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(source).map_err(|e| ScrapeError::InvalidSelector {
        selector: source.to_string(),
        reason: e.to_string(),
    })
}

fn first<'a>(scope: ElementRef<'a>, source: &str) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    Ok(scope.select(&selector(source)?).next())
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn required_attr(
    element: ElementRef<'_>,
    selector: &str,
    attribute: &str,
) -> Result<String, ScrapeError> {
    element
        .value()
        .attr(attribute)
        .map(String::from)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            selector: selector.to_string(),
            attribute: attribute.to_string(),
        })
}

fn missing_element(selector: &str) -> ScrapeError {
    ScrapeError::MissingElement {
        selector: selector.to_string(),
    }
}
