//! Session extractors.
//!
//! Both extractors read the session cookie and hand it to the verifier;
//! neither duplicates any verification logic. A missing or invalid cookie
//! is an anonymous request, not an error.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use velora_core::{Locale, Route};

use crate::session::{SESSION_COOKIE_NAME, Session};
use crate::state::AppState;

/// Extractor that optionally yields the current session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalSession(session): OptionalSession) -> impl IntoResponse {
///     match session {
///         Some(s) => format!("Hello, {}!", s.display_name()),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalSession(pub Option<Session>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let session = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| state.sessions().verify(cookie.value()));

        Ok(Self(session))
    }
}

/// Extractor that requires an authenticated session.
///
/// Without one, the request is redirected to the localized login page.
pub struct RequireSession(pub Session);

/// Rejection for [`RequireSession`]: a redirect to the login page in the
/// active locale.
pub struct LoginRedirect(String);

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.0).into_response()
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let OptionalSession(session) = match OptionalSession::from_request_parts(parts, state).await
        {
            Ok(session) => session,
            Err(never) => match never {},
        };

        session.map(RequireSession).ok_or_else(|| {
            let locale = parts
                .extensions
                .get::<Locale>()
                .copied()
                .unwrap_or_default();
            LoginRedirect(Route::Login.href(locale))
        })
    }
}

/// Build the session cookie carrying a freshly issued token.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie
}

/// Build a removal cookie clearing the session (logout).
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, "");
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie
}
