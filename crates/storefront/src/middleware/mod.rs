//! HTTP middleware stack for the storefront.
//!
//! # Edge pipeline order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (unique ID per request)
//! 4. Security headers (stamped on whatever the locale step produced)
//! 5. Locale resolution (detect or redirect)
//!
//! Locale resolution runs *first* on the request path and security headers
//! are applied *second* on the response path: even a locale redirect leaves
//! the server with the full header set.

pub mod auth;
pub mod locale;
pub mod request_id;
pub mod security_headers;

pub use auth::{OptionalSession, RequireSession, clear_session_cookie, session_cookie};
pub use locale::{ActiveLocale, locale_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
