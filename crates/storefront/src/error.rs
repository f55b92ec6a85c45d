//! Unified error handling with Sentry integration.
//!
//! Two layers:
//!
//! - [`AppError`] is the plain application error. Its `IntoResponse` renders
//!   a bare status + generic message, suitable for API routes. Server-side
//!   failures are captured to Sentry before responding.
//! - [`PageError`] wraps an `AppError` with the active locale and renders
//!   the localized fallback page ("something went wrong" / "try again")
//!   instead of raw error text. Page handlers return this.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use velora_core::{Locale, Route};

use crate::cache::FetchError;
use crate::context::PageContext;
use crate::filters;
use crate::session::SessionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A cached upstream fetch failed.
    #[error("Upstream fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Session token issuance failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Attach the active locale, turning this into a page-rendering error.
    #[must_use]
    pub const fn at(self, locale: Locale) -> PageError {
        PageError {
            error: self,
            locale,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Capture server-side failures to Sentry, with a log line carrying the
    /// event id for correlation.
    fn capture(&self) {
        if matches!(self, Self::Fetch(_) | Self::Session(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.capture();

        let status = self.status();
        // Don't expose internal error details to clients
        let message = match &self {
            Self::Fetch(_) => "External service error".to_string(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// An error bound to a locale, rendered as the localized fallback page.
#[derive(Debug)]
pub struct PageError {
    error: AppError,
    locale: Locale,
}

impl PageError {
    /// A failed upstream fetch on a page render.
    #[must_use]
    pub fn upstream(error: FetchError, locale: Locale) -> Self {
        AppError::from(error).at(locale)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.capture();

        let status = self.error.status();
        let ctx = PageContext::bare(self.locale, &Route::Home, None);
        let template = if status == StatusCode::NOT_FOUND {
            ErrorTemplate::not_found(ctx)
        } else {
            ErrorTemplate::server_error(ctx)
        };

        (status, template).into_response()
    }
}

/// Localized fallback page, used for 404s and upstream failures alike.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub ctx: PageContext,
    pub title: &'static str,
    pub message: &'static str,
    pub show_retry: bool,
}

impl ErrorTemplate {
    /// "Page not found" in the context's locale.
    #[must_use]
    pub const fn not_found(ctx: PageContext) -> Self {
        let strings = ctx.strings;
        Self {
            ctx,
            title: strings.not_found_title,
            message: strings.not_found_body,
            show_retry: false,
        }
    }

    /// "Something went wrong" in the context's locale.
    #[must_use]
    pub const fn server_error(ctx: PageContext) -> Self {
        let strings = ctx.strings;
        Self {
            ctx,
            title: strings.error_title,
            message: strings.error_body,
            show_retry: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_page_error_renders_localized_strings() {
        let ctx = PageContext::bare(Locale::Fr, &Route::Home, None);
        let template = ErrorTemplate::server_error(ctx);
        assert_eq!(template.title, "Une erreur est survenue");
        assert!(template.show_retry);
    }
}
