//! Brand listing and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::{Locale, Route};

use crate::catalog::types::{Brand, SearchParams};
use crate::context::PageContext;
use crate::error::{ErrorTemplate, PageError};
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Brand card data for the listing grid.
#[derive(Clone)]
pub struct BrandCardView {
    pub name: String,
    pub href: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl BrandCardView {
    fn from_brand(brand: &Brand, locale: Locale) -> Self {
        Self {
            name: brand.name.clone(),
            href: Route::BrandDetail {
                slug: brand.slug.clone(),
            }
            .href(locale),
            description: brand.description.clone(),
            logo_url: brand.logo_url.clone(),
        }
    }
}

/// Brand listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "brands/index.html")]
pub struct BrandsIndexTemplate {
    pub ctx: PageContext,
    pub brands: Vec<BrandCardView>,
}

/// Display the brand listing page.
///
/// An upstream failure degrades to an empty grid.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> impl IntoResponse {
    let brands = state.queries().brands().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "brand list unavailable, rendering empty");
        Vec::new()
    });

    let ctx = PageContext::build(&state, locale, &Route::Brands, session.as_ref()).await;

    BrandsIndexTemplate {
        brands: brands
            .iter()
            .map(|b| BrandCardView::from_brand(b, locale))
            .collect(),
        ctx,
    }
}

/// Brand detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "brands/show.html")]
pub struct BrandShowTemplate {
    pub ctx: PageContext,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub products: Vec<ProductCardView>,
}

/// Products shown on a brand page.
const BRAND_PAGE_SIZE: u32 = 12;

/// Display a brand detail page with the brand's products.
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
    let brand = state
        .queries()
        .brand(&slug)
        .await
        .map_err(|err| PageError::upstream(err, locale))?;

    let Some(brand) = brand else {
        let ctx = PageContext::build(&state, locale, &Route::Brands, session.as_ref()).await;
        return Ok((StatusCode::NOT_FOUND, ErrorTemplate::not_found(ctx)).into_response());
    };

    let params = SearchParams {
        brand: Some(brand.slug.clone()),
        page_size: BRAND_PAGE_SIZE,
        ..SearchParams::default()
    };
    let products = state
        .queries()
        .search_products(&params)
        .await
        .map(|r| {
            r.items
                .iter()
                .map(|p| ProductCardView::from_product(p, locale))
                .collect()
        })
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "brand products unavailable, rendering empty");
            Vec::new()
        });

    let route = Route::BrandDetail {
        slug: brand.slug.clone(),
    };
    let ctx = PageContext::build(&state, locale, &route, session.as_ref()).await;

    Ok(BrandShowTemplate {
        ctx,
        name: brand.name,
        description: brand.description,
        logo_url: brand.logo_url,
        products,
    }
    .into_response())
}
