//! Contact page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::Route;

use crate::context::PageContext;
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::state::AppState;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
    /// WordPress-managed contact content, when the CMS provides it.
    pub content_html: Option<String>,
}

/// Display the contact page.
///
/// The body is CMS-managed; when the page is missing or the CMS is down the
/// template falls back to the static contact details.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> impl IntoResponse {
    let content_html = match state.queries().page(locale, "contact").await {
        Ok(page) => page.map(|p| p.content.rendered),
        Err(err) => {
            tracing::warn!(error = %err, "contact page unavailable, using fallback");
            None
        }
    };

    let ctx = PageContext::build(&state, locale, &Route::Contact, session.as_ref()).await;

    ContactTemplate { ctx, content_html }
}
