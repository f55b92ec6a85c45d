//! Velora Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing
//! the full router (edge pipeline included) to be exercised by the
//! integration tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod middleware;
pub mod queries;
pub mod retry;
pub mod routes;
pub mod session;
pub mod state;
pub mod wordpress;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router with the edge pipeline attached.
///
/// Layer order matters: locale resolution runs first on the request path,
/// and security headers are stamped on whatever response it produced -
/// pages, redirects, and 404s alike. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/suggest", get(routes::api::suggest))
        .merge(routes::router())
        .fallback(routes::not_found)
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::locale_middleware))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Upstream APIs are deliberately
/// not probed here: the storefront degrades per page, it does not go down
/// with its upstreams.
async fn health() -> &'static str {
    "ok"
}
