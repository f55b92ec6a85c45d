//! Security headers middleware.
//!
//! Runs second in the edge pipeline: whatever response locale resolution
//! produced - page, redirect, or 404 - gets the full fixed header set.
//! Header stamping has no failure path.

use axum::extract::Request;
use axum::http::header::{
    CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

/// The content security policy, with explicit allowed origins per directive.
///
/// Scripts and connections admit the analytics origin, styles and fonts the
/// font CDN, and images the two upstream content hosts.
const CSP: &str = "default-src 'self'; \
     script-src 'self' https://www.googletagmanager.com; \
     style-src 'self' https://fonts.googleapis.com; \
     font-src 'self' https://fonts.gstatic.com; \
     img-src 'self' data: https://cdn.velora.shop https://cms.velora.shop; \
     connect-src 'self' https://www.google-analytics.com; \
     frame-src 'none'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'; \
     upgrade-insecure-requests";

/// Two years, the preload-list minimum.
const HSTS: &str = "max-age=63072000; includeSubDomains; preload";

/// Add the fixed security header set to every response.
///
/// Headers applied:
/// - `Strict-Transport-Security` - force HTTPS
/// - `X-Frame-Options: DENY` - prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - prevent MIME sniffing
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Content-Security-Policy` - explicit allowed origins (see [`CSP`])
/// - `Permissions-Policy` - deny sensitive browser features
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));

    // Prevent clickjacking
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Prevent MIME sniffing
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP));

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=()",
        ),
    );

    response
}
