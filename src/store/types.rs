//! Record types produced and consumed by [`StoreClient`](super::StoreClient).
//!
//! Style and size lookups are case-insensitive: keys are lower-cased when
//! they are built, both from scraped markup and from caller selectors.
//! Products without a style list or size selector use the explicit
//! `Default` sentinel key instead of a nullable key.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of a product style in [`ProductInfo::styles`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleKey {
    /// The product has a single implicit style, or none at all.
    Default,
    /// A named style such as a color, lower-cased.
    Named(String),
}

impl StyleKey {
    /// Builds a named key, lower-casing the style name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_lowercase())
    }

    /// Builds the lookup key for an optional caller selector.
    ///
    /// `None` selects the [`StyleKey::Default`] sentinel.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector.map_or(Self::Default, Self::named)
    }

    /// Returns the lower-cased style name, or `None` for the sentinel.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("(default)"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Serialized as the style name, or an empty string for the sentinel.
impl Serialize for StyleKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name().unwrap_or_default())
    }
}

/// Key of a size in a [`SizeMap`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeKey {
    /// The product has no size selector, only a fixed size value.
    Default,
    /// A size label, trimmed and lower-cased.
    Named(String),
}

impl SizeKey {
    /// Builds a named key, trimming and lower-casing the label.
    #[must_use]
    pub fn named(label: &str) -> Self {
        Self::Named(label.trim().to_lowercase())
    }

    /// Builds the lookup key for an optional caller selector.
    ///
    /// `None` selects the [`SizeKey::Default`] sentinel.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector.map_or(Self::Default, Self::named)
    }

    /// Returns the lower-cased size label, or `None` for the sentinel.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(label) => Some(label),
        }
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("(default)"),
            Self::Named(label) => f.write_str(label),
        }
    }
}

/// Serialized as the size label, or an empty string for the sentinel.
impl Serialize for SizeKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label().unwrap_or_default())
    }
}

/// An insertion-ordered map keeping the order entries appear on the page.
///
/// Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> VariantMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a value, replacing (in place) any existing value for `key`.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Returns `true` if the map holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the keys in page order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the entries in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V> Default for VariantMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for VariantMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Serialize, V: Serialize> Serialize for VariantMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Entries are read in document order.
impl<'de, K, V> Deserialize<'de> for VariantMap<K, V>
where
    K: Deserialize<'de> + PartialEq,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
        where
            K: Deserialize<'de> + PartialEq,
            V: Deserialize<'de>,
        {
            type Value = VariantMap<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = VariantMap::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Size labels mapped to the opaque value submitted to the cart endpoint.
pub type SizeMap = VariantMap<SizeKey, String>;

/// Styles of a product, in page order.
pub type StyleMap = VariantMap<StyleKey, StyleInfo>;

/// A single style (variant) of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleInfo {
    /// Site-specific style id, `None` when the page exposes none.
    pub id: Option<String>,
    /// URL of the page showing this style.
    pub href: String,
    /// Whether the site marks this style as sold out.
    pub is_sold_out: bool,
    /// Sizes, only known for an available style whose own page was loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<SizeMap>,
}

impl StyleInfo {
    /// Returns the submission value for `size`, if this style can be bought in it.
    #[must_use]
    pub fn size_value(&self, size: &SizeKey) -> Option<&str> {
        self.sizes
            .as_ref()
            .and_then(|sizes| sizes.get(size))
            .map(String::as_str)
    }
}

/// Product metadata scraped from a product page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    /// Product name.
    pub name: String,
    /// Price text as displayed.
    pub price: String,
    /// Site-relative add-to-cart endpoint; `None` means the product cannot be bought.
    pub cart_url: Option<String>,
    /// Styles of the product.
    pub styles: StyleMap,
}

/// Checkout form fields supplied by the caller (address, payment, contact).
///
/// The contents are never interpreted; they are submitted verbatim with the
/// checkout form, in the order they were given.
///
/// ```rust
/// use storefront_checkout::UserInfo;
///
/// let user_info: UserInfo = serde_json::from_str(
///     r#"{"order[billing_name]": "Jane Doe", "order[email]": "jane@example.com"}"#,
/// ).unwrap();
/// assert_eq!(user_info.get("order[billing_name]"), Some("Jane Doe"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(VariantMap<String, String>);

impl UserInfo {
    /// Creates an empty set of fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(k, v)| (k == field).then_some(v.as_str()))
    }

    /// Iterates over the fields in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UserInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A request to buy one product.
///
/// # Example
///
/// ```rust
/// use storefront_checkout::{PurchaseRequest, UserInfo};
///
/// let request = PurchaseRequest::new("/shop/jackets/que2rcwml/enfa3481d", UserInfo::new())
///     .style("Red")
///     .size("Small");
///
/// assert_eq!(request.style.as_deref(), Some("Red"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Absolute or site-relative product URL.
    pub product_url: String,
    /// Style name, matched case-insensitively. `None` for single-style products.
    pub style: Option<String>,
    /// Size label, matched case-insensitively. `None` for products without sizes.
    pub size: Option<String>,
    /// Checkout form fields.
    pub user_info: UserInfo,
}

impl PurchaseRequest {
    /// Creates a request without style or size selectors.
    #[must_use]
    pub fn new(product_url: impl Into<String>, user_info: UserInfo) -> Self {
        Self {
            product_url: product_url.into(),
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
}

/// The outcome of a successful purchase.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderResult {
    /// The product page the order was placed from.
    pub product_info: ProductInfo,
    /// Raw JSON answer of the checkout endpoint.
    pub order_info: serde_json::Value,
}
