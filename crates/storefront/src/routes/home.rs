//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::Route;

use crate::catalog::types::SearchParams;
use crate::context::PageContext;
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::routes::blog::PostCardView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Featured products on the home page.
const FEATURED_COUNT: u32 = 8;

/// Recent posts on the home page.
const RECENT_POSTS: u32 = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub featured: Vec<ProductCardView>,
    pub recent_posts: Vec<PostCardView>,
}

/// Display the home page.
///
/// The two upstream fetches run concurrently and each degrades to an empty
/// section on failure; the home page always renders.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> impl IntoResponse {
    let params = SearchParams {
        page_size: FEATURED_COUNT,
        ..SearchParams::default()
    };

    let (search, posts) = tokio::join!(
        state.queries().search_products(&params),
        state.queries().posts(locale, 1, RECENT_POSTS),
    );

    let featured = search.map_or_else(
        |err| {
            tracing::warn!(error = %err, "featured products unavailable");
            Vec::new()
        },
        |response| {
            response
                .items
                .iter()
                .map(|p| ProductCardView::from_product(p, locale))
                .collect()
        },
    );

    let recent_posts = posts.map_or_else(
        |err| {
            tracing::warn!(error = %err, "recent posts unavailable");
            Vec::new()
        },
        |posts| {
            posts
                .iter()
                .map(|p| PostCardView::from_post(p, locale))
                .collect()
        },
    );

    let ctx = PageContext::build(&state, locale, &Route::Home, session.as_ref()).await;

    HomeTemplate {
        ctx,
        featured,
        recent_posts,
    }
}
