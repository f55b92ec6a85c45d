//! Account area route handlers. All of them require a session.
//!
//! Order data is fetched directly from the catalog client, bypassing the
//! query cache: session-scoped data is never cached.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::Route;

use crate::context::PageContext;
use crate::error::PageError;
use crate::filters;
use crate::middleware::{ActiveLocale, RequireSession};
use crate::routes::products::format_price;
use crate::state::AppState;

/// The profile as the account pages render it.
#[derive(Clone)]
pub struct ProfileView {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

impl ProfileView {
    fn from_session(session: &crate::session::Session) -> Self {
        Self {
            email: session.user.email.clone(),
            name: session.user.name.clone(),
            role: session.user.role.clone(),
            permissions: session.user.permissions.clone().unwrap_or_default(),
        }
    }
}

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub ctx: PageContext,
    pub profile: ProfileView,
}

/// Display the account overview.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    RequireSession(session): RequireSession,
) -> impl IntoResponse {
    let ctx = PageContext::build(&state, locale, &Route::Account, Some(&session)).await;

    AccountTemplate {
        ctx,
        profile: ProfileView::from_session(&session),
    }
}

/// One order row.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub placed_at: String,
    pub status: String,
    pub total: String,
    pub item_count: usize,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub ctx: PageContext,
    pub orders: Vec<OrderView>,
}

/// Display the order history.
///
/// # Errors
///
/// Renders the localized error page if the catalog is unavailable.
#[instrument(skip(state, session))]
pub async fn orders(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    RequireSession(session): RequireSession,
) -> Result<impl IntoResponse, PageError> {
    let orders = state
        .queries()
        .catalog()
        .list_orders(&session.user.id)
        .await
        .map_err(|err| PageError::upstream(err.into(), locale))?;

    let ctx = PageContext::build(&state, locale, &Route::Orders, Some(&session)).await;

    Ok(OrdersTemplate {
        ctx,
        orders: orders
            .iter()
            .map(|o| OrderView {
                number: o.number.clone(),
                placed_at: o.placed_at.clone(),
                status: o.status.clone(),
                total: format_price(&o.total),
                item_count: o.items.len(),
            })
            .collect(),
    })
}

/// Account settings template.
#[derive(Template, WebTemplate)]
#[template(path = "account/settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub profile: ProfileView,
}

/// Display the account settings page.
#[instrument(skip(state, session))]
pub async fn settings(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    RequireSession(session): RequireSession,
) -> impl IntoResponse {
    let ctx = PageContext::build(&state, locale, &Route::Settings, Some(&session)).await;

    SettingsTemplate {
        ctx,
        profile: ProfileView::from_session(&session),
    }
}
