//! Locale detection and redirection.
//!
//! Runs first in the edge pipeline, before security headers are stamped.
//! Every page URL must carry a recognized locale as its first path segment;
//! a request without one is redirected to the same path (query string
//! preserved) under the default locale. Static assets, API routes, and the
//! health endpoint are excluded.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use velora_core::Locale;

/// Path prefixes the locale pipeline does not apply to.
const EXCLUDED_PREFIXES: &[&str] = &["/static", "/api", "/health"];

/// Exact paths the locale pipeline does not apply to.
const EXCLUDED_PATHS: &[&str] = &["/favicon.ico", "/robots.txt"];

fn is_excluded(path: &str) -> bool {
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        || EXCLUDED_PATHS.contains(&path)
}

/// Middleware resolving the active locale from the path prefix.
///
/// On a recognized prefix the locale is stored in request extensions for
/// the [`ActiveLocale`] extractor. Anything else - including `/` - falls
/// back to the default locale via redirect; there is no failure path.
pub async fn locale_middleware(mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_excluded(&path) {
        return next.run(request).await;
    }

    let first_segment = path.split('/').find(|segment| !segment.is_empty());
    if let Some(locale) = first_segment.and_then(Locale::from_path_segment) {
        request.extensions_mut().insert(locale);
        return next.run(request).await;
    }

    let suffix = if path == "/" { "" } else { path.as_str() };
    let target = match request.uri().query() {
        Some(query) => format!("/{}{suffix}?{query}", Locale::DEFAULT),
        None => format!("/{}{suffix}", Locale::DEFAULT),
    };

    tracing::debug!(from = %path, to = %target, "redirecting to default locale");
    Redirect::temporary(&target).into_response()
}

/// Extractor for the locale resolved by [`locale_middleware`].
///
/// Falls back to the default locale if the middleware did not run; pages
/// always render under exactly one locale.
#[derive(Debug, Clone, Copy)]
pub struct ActiveLocale(pub Locale);

impl<S> FromRequestParts<S> for ActiveLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Locale>().copied().unwrap_or_else(
            || {
                tracing::warn!("no locale in request extensions - middleware may be misconfigured");
                Locale::DEFAULT
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusions() {
        assert!(is_excluded("/static/main.css"));
        assert!(is_excluded("/api/suggest"));
        assert!(is_excluded("/health"));
        assert!(is_excluded("/favicon.ico"));
        assert!(!is_excluded("/es/marcas"));
        assert!(!is_excluded("/"));
    }
}
