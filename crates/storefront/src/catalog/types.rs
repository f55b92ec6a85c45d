//! Catalog API data transfer objects.
//!
//! These mirror the upstream JSON shapes one-to-one. The backend is trusted:
//! beyond required-field presence there is no local validation, and the
//! values are treated as immutable snapshots owned by the catalog service.

use serde::{Deserialize, Serialize};

/// A monetary amount as the catalog API sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as a string (e.g. `"24.90"`).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Brand reference embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    pub slug: String,
    pub name: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<BrandRef>,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub in_stock: bool,
}

/// A brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A page of product search results.
///
/// `page` and `page_size` echo the request; `total` and `total_pages` are
/// computed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// An autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Parameters for a product search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 21;

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            brand: None,
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The profile returned by the catalog API after credential validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_slug: Option<String>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// A past order in the account area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub number: String,
    pub placed_at: String,
    pub status: String,
    pub total: Money,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}
