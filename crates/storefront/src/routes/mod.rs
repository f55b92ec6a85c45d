//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! Every page is registered once per locale from the shared route table, so
//! the table in `velora-core` is the single source of truth for the URL
//! surface. Shown here in English; Spanish and French renditions follow the
//! table.
//!
//! ```text
//! GET  /{locale}                      - Home page
//! GET  /{locale}/products             - Product listing / search
//! GET  /{locale}/products/{slug}      - Product detail
//! GET  /{locale}/brands               - Brand listing
//! GET  /{locale}/brands/{slug}        - Brand detail
//! GET  /{locale}/blog                 - Blog index
//! GET  /{locale}/blog/{slug}          - Blog post
//! GET  /{locale}/contact              - Contact page
//! GET  /{locale}/login                - Login page
//! POST /{locale}/login                - Login action
//! POST /{locale}/logout               - Logout action
//! GET  /{locale}/account              - Account overview (requires session)
//! GET  /{locale}/account/orders       - Order history (requires session)
//! GET  /{locale}/account/settings     - Account settings (requires session)
//! GET  /{locale}/privacy              - Privacy policy (CMS)
//! GET  /{locale}/terms                - Terms of service (CMS)
//! GET  /{locale}/cookies              - Cookie policy (CMS)
//!
//! # Outside the locale prefix
//! GET  /health                        - Health check
//! GET  /api/suggest                   - Autocomplete suggestions (JSON)
//! ```

pub mod account;
pub mod api;
pub mod auth;
pub mod blog;
pub mod brands;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{MethodRouter, get, post};
use velora_core::routes::{ROUTE_TABLE, RouteId};
use velora_core::{Locale, Route};

use crate::context::PageContext;
use crate::error::ErrorTemplate;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::state::AppState;

/// The handler for one abstract route.
fn method_router(id: RouteId) -> MethodRouter<AppState> {
    match id {
        RouteId::Home => get(home::home),
        RouteId::Products => get(products::index),
        RouteId::ProductDetail => get(products::show),
        RouteId::Brands => get(brands::index),
        RouteId::BrandDetail => get(brands::show),
        RouteId::Blog => get(blog::index),
        RouteId::BlogPost => get(blog::show),
        RouteId::Contact => get(contact::show),
        RouteId::Login => get(auth::login_page).post(auth::login),
        RouteId::Logout => post(auth::logout),
        RouteId::Account => get(account::index),
        RouteId::Orders => get(account::orders),
        RouteId::Settings => get(account::settings),
        RouteId::Privacy => get(pages::privacy),
        RouteId::Terms => get(pages::terms),
        RouteId::CookiePolicy => get(pages::cookie_policy),
    }
}

/// Create all localized page routes by iterating the route table.
pub fn router() -> Router<AppState> {
    let mut router = Router::new();

    for locale in Locale::ALL {
        for def in ROUTE_TABLE {
            let pattern = def.spec.for_locale(locale);
            let path = if pattern == "/" {
                format!("/{locale}")
            } else {
                format!("/{locale}{pattern}")
            };
            router = router.route(&path, method_router(def.id));
        }
    }

    router
}

/// Fallback for paths that carry a valid locale but match no route.
pub async fn not_found(
    axum::extract::State(state): axum::extract::State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> impl IntoResponse {
    let ctx = PageContext::build(&state, locale, &Route::Home, session.as_ref()).await;
    (StatusCode::NOT_FOUND, ErrorTemplate::not_found(ctx))
}
