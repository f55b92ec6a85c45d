//! Login and logout route handlers.
//!
//! Credentials are validated by the catalog API; on success the storefront
//! mints its own signed session token and stores it in the HTTP-only
//! session cookie. Verification of that cookie lives in
//! [`crate::session`]; nothing here re-checks tokens.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;
use velora_core::Route;

use crate::context::PageContext;
use crate::error::{AppError, PageError};
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession, clear_session_cookie, session_cookie};
use crate::state::AppState;

/// Login page query parameters.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Set after a failed attempt so the form shows the error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub show_error: bool,
    pub login_action: String,
}

/// Display the login form.
#[instrument(skip(state, session))]
pub async fn login_page(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    // Already signed in: straight to the account page
    if session.is_some() {
        return Redirect::to(&Route::Account.href(locale)).into_response();
    }

    let ctx = PageContext::build(&state, locale, &Route::Login, None).await;

    LoginTemplate {
        ctx,
        show_error: query.error.is_some(),
        login_action: Route::Login.href(locale),
    }
    .into_response()
}

/// Handle a login attempt.
///
/// Invalid credentials redirect back to the form with an error flag; only
/// an unreachable catalog API renders the error page.
///
/// # Errors
///
/// Renders the localized error page if the catalog is unavailable.
#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let user = state
        .queries()
        .catalog()
        .login(&form.email, &form.password)
        .await
        .map_err(|err| PageError::upstream(err.into(), locale))?;

    let Some(user) = user else {
        tracing::debug!("login rejected by catalog API");
        let target = format!("{}?error=1", Route::Login.href(locale));
        return Ok((jar, Redirect::to(&target)));
    };

    let token = state
        .sessions()
        .issue(&user)
        .map_err(|err| AppError::from(err).at(locale))?;

    tracing::info!(user_id = %user.id, "user signed in");
    let jar = jar.add(session_cookie(token, state.config().is_secure()));
    Ok((jar, Redirect::to(&Route::Account.href(locale))))
}

/// Handle logout: clear the session cookie and return home.
#[instrument(skip(jar))]
pub async fn logout(
    ActiveLocale(locale): ActiveLocale,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let jar = jar.remove(clear_session_cookie());
    (jar, Redirect::to(&Route::Home.href(locale)))
}
