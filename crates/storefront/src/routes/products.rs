//! Product listing and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::instrument;
use velora_core::{Locale, Route};

use crate::catalog::types::{Money, Product, SearchParams, SearchResponse};
use crate::context::PageContext;
use crate::error::{ErrorTemplate, PageError};
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Product card data for grids (home, listing, brand pages).
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub href: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub brand_name: Option<String>,
    pub in_stock: bool,
}

impl ProductCardView {
    /// Build a card from a catalog product, localizing its detail href.
    #[must_use]
    pub fn from_product(product: &Product, locale: Locale) -> Self {
        let image = product.images.first();
        Self {
            name: product.name.clone(),
            href: Route::ProductDetail {
                slug: product.slug.clone(),
            }
            .href(locale),
            price: format_price(&product.price),
            compare_at_price: product.compare_at_price.as_ref().map(format_price),
            image_url: image.map(|i| i.url.clone()),
            image_alt: image
                .and_then(|i| i.alt.clone())
                .unwrap_or_else(|| product.name.clone()),
            brand_name: product.brand.as_ref().map(|b| b.name.clone()),
            in_stock: product.in_stock,
        }
    }
}

/// Format a catalog money value for display.
#[must_use]
pub fn format_price(money: &Money) -> String {
    match money.currency.as_str() {
        "EUR" => format!("{} €", money.amount),
        "USD" => format!("${}", money.amount),
        "GBP" => format!("£{}", money.amount),
        _ => format!("{} {}", money.amount, money.currency),
    }
}

/// Pagination controls for the listing page.
#[derive(Clone)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PaginationView {
    fn build(locale: Locale, query: &ProductListQuery, response: &SearchResponse) -> Self {
        let page_href = |page: u32| {
            let mut params = vec![format!("page={page}")];
            if let Some(q) = &query.q {
                params.push(format!("q={}", urlencoding::encode(q)));
            }
            if let Some(brand) = &query.brand {
                params.push(format!("brand={}", urlencoding::encode(brand)));
            }
            if let Some(sort) = &query.sort {
                params.push(format!("sort={}", urlencoding::encode(sort)));
            }
            format!("{}?{}", Route::Products.href(locale), params.join("&"))
        };

        Self {
            current_page: response.page,
            total_pages: response.total_pages,
            prev_href: (response.page > 0).then(|| page_href(response.page - 1)),
            next_href: (response.page + 1 < response.total_pages)
                .then(|| page_href(response.page + 1)),
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub ctx: PageContext,
    pub products: Vec<ProductCardView>,
    pub query: String,
    pub total: u64,
    pub pagination: PaginationView,
}

/// Display the product listing / search page.
///
/// An upstream failure degrades to an empty result grid; the listing never
/// hard-fails on catalog trouble.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
    Query(query): Query<ProductListQuery>,
) -> impl IntoResponse {
    let params = SearchParams {
        query: query.q.clone().filter(|q| !q.trim().is_empty()),
        brand: query.brand.clone(),
        sort: query.sort.clone(),
        page: query.page.unwrap_or(0),
        ..SearchParams::default()
    };

    let response = match state.queries().search_products(&params).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "product search unavailable, rendering empty listing");
            SearchResponse {
                items: Vec::new(),
                total: 0,
                page: params.page,
                page_size: params.page_size,
                total_pages: 0,
            }
        }
    };

    let route = Route::Products;
    let ctx = PageContext::build(&state, locale, &route, session.as_ref()).await;

    ProductsIndexTemplate {
        products: response
            .items
            .iter()
            .map(|p| ProductCardView::from_product(p, locale))
            .collect(),
        query: query.q.clone().unwrap_or_default(),
        total: response.total,
        pagination: PaginationView::build(locale, &query, &response),
        ctx,
    }
}

// =============================================================================
// Detail
// =============================================================================

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub ctx: PageContext,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub images: Vec<ImageView>,
    pub brand_name: Option<String>,
    pub brand_href: Option<String>,
    pub in_stock: bool,
    pub related: Vec<ProductCardView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Number of related products shown below the detail.
const RELATED_COUNT: u32 = 4;

/// Display a product detail page.
///
/// # Errors
///
/// Renders the localized error page if the catalog is unavailable.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, PageError> {
    let product = state
        .queries()
        .product(&slug)
        .await
        .map_err(|err| PageError::upstream(err, locale))?;

    let Some(product) = product else {
        let ctx = PageContext::build(&state, locale, &Route::Products, session.as_ref()).await;
        return Ok((StatusCode::NOT_FOUND, ErrorTemplate::not_found(ctx)).into_response());
    };

    // Related products share the brand; a failed fetch just hides the strip.
    let related = match &product.brand {
        Some(brand) => {
            let params = SearchParams {
                brand: Some(brand.slug.clone()),
                page_size: RELATED_COUNT,
                ..SearchParams::default()
            };
            state
                .queries()
                .search_products(&params)
                .await
                .map(|r| {
                    r.items
                        .iter()
                        .filter(|p| p.slug != product.slug)
                        .map(|p| ProductCardView::from_product(p, locale))
                        .collect()
                })
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "related products unavailable");
                    Vec::new()
                })
        }
        None => Vec::new(),
    };

    let route = Route::ProductDetail {
        slug: product.slug.clone(),
    };
    let ctx = PageContext::build(&state, locale, &route, session.as_ref()).await;

    Ok(ProductShowTemplate {
        ctx,
        name: product.name.clone(),
        description: product.description.clone(),
        price: format_price(&product.price),
        compare_at_price: product.compare_at_price.as_ref().map(format_price),
        images: product
            .images
            .iter()
            .map(|i| ImageView {
                url: i.url.clone(),
                alt: i.alt.clone().unwrap_or_else(|| product.name.clone()),
            })
            .collect(),
        brand_name: product.brand.as_ref().map(|b| b.name.clone()),
        brand_href: product.brand.as_ref().map(|b| {
            Route::BrandDetail {
                slug: b.slug.clone(),
            }
            .href(locale)
        }),
        in_stock: product.in_stock,
        related,
    }
    .into_response())
}
