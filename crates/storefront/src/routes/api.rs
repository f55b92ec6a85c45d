//! JSON API routes (outside the locale prefix).

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::types::Suggestion;
use crate::state::AppState;

/// Autocomplete query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Autocomplete suggestions endpoint.
///
/// A read path: catalog trouble degrades to an empty suggestion list so the
/// search box never breaks.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    let prefix = query.q.trim();
    if prefix.is_empty() {
        return Json(Vec::new());
    }

    match state.queries().suggestions(prefix).await {
        Ok(suggestions) => Json(suggestions),
        Err(err) => {
            tracing::warn!(error = %err, "suggestions unavailable");
            Json(Vec::new())
        }
    }
}
