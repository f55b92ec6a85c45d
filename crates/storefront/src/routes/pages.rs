//! Legal/CMS page route handlers.
//!
//! Each legal route maps to a fixed WordPress page slug; the content is
//! edited upstream and rendered verbatim.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::{Locale, Route};

use crate::context::PageContext;
use crate::error::{ErrorTemplate, PageError};
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::session::Session;
use crate::state::AppState;

/// CMS page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct CmsPageTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub content_html: String,
}

/// Render one CMS-backed page.
async fn render_cms_page(
    state: &AppState,
    locale: Locale,
    session: Option<&Session>,
    route: Route,
    wp_slug: &str,
) -> Result<axum::response::Response, PageError> {
    let page = state
        .queries()
        .page(locale, wp_slug)
        .await
        .map_err(|err| PageError::upstream(err, locale))?;

    let ctx = PageContext::build(state, locale, &route, session).await;

    let Some(page) = page else {
        tracing::warn!(slug = %wp_slug, "CMS page missing upstream");
        return Ok((StatusCode::NOT_FOUND, ErrorTemplate::not_found(ctx)).into_response());
    };

    Ok(CmsPageTemplate {
        ctx,
        title: page.title.rendered,
        content_html: page.content.rendered,
    }
    .into_response())
}

/// Display the privacy policy.
///
/// # Errors
///
/// Renders the localized error page if the CMS is unavailable.
#[instrument(skip(state, session))]
pub async fn privacy(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> Result<impl IntoResponse, PageError> {
    render_cms_page(
        &state,
        locale,
        session.as_ref(),
        Route::Privacy,
        "privacy-policy",
    )
    .await
}

/// Display the terms of service.
///
/// # Errors
///
/// Renders the localized error page if the CMS is unavailable.
#[instrument(skip(state, session))]
pub async fn terms(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> Result<impl IntoResponse, PageError> {
    render_cms_page(
        &state,
        locale,
        session.as_ref(),
        Route::Terms,
        "terms-of-service",
    )
    .await
}

/// Display the cookie policy.
///
/// # Errors
///
/// Renders the localized error page if the CMS is unavailable.
#[instrument(skip(state, session))]
pub async fn cookie_policy(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> Result<impl IntoResponse, PageError> {
    render_cms_page(
        &state,
        locale,
        session.as_ref(),
        Route::CookiePolicy,
        "cookie-policy",
    )
    .await
}
