//! Shared helpers for Velora integration tests.
//!
//! Tests drive the full router - edge pipeline included - via
//! `tower::ServiceExt::oneshot`, with both upstream APIs mocked by
//! `wiremock` servers.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use secrecy::SecretString;
use velora_storefront::config::{AnalyticsConfig, StorefrontConfig};
use velora_storefront::state::AppState;

/// High-entropy secret for test sessions; real deployments load theirs from
/// the environment.
pub const TEST_SESSION_SECRET: &str = "k9f2Lx7Qw1Zr8Tb3Nv6Mj4Hs0Pd5Gc2a";

/// A storefront configuration pointing at mocked upstreams.
#[must_use]
pub fn test_config(catalog_url: &str, wordpress_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        catalog_api_url: catalog_url.to_string(),
        wordpress_api_url: wordpress_url.to_string(),
        session_secret: SecretString::from(TEST_SESSION_SECRET.to_string()),
        analytics: AnalyticsConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// The full application (router + edge pipeline) against mocked upstreams.
#[must_use]
pub fn test_app(catalog_url: &str, wordpress_url: &str) -> Router {
    let state = AppState::new(test_config(catalog_url, wordpress_url));
    velora_storefront::app(state)
}

/// Build a GET request for the router.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
