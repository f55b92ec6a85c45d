//! Blog route handlers, backed by WordPress posts.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use velora_core::{Locale, Route};

use crate::context::PageContext;
use crate::error::{ErrorTemplate, PageError};
use crate::filters;
use crate::middleware::{ActiveLocale, OptionalSession};
use crate::state::AppState;
use crate::wordpress::types::WpPost;

/// Post card for the blog index.
#[derive(Clone)]
pub struct PostCardView {
    pub title: String,
    pub href: String,
    pub date: String,
    pub excerpt_html: String,
}

impl PostCardView {
    /// Build a card from a WordPress post, localizing its href.
    #[must_use]
    pub fn from_post(post: &WpPost, locale: Locale) -> Self {
        Self {
            title: post.title.rendered.clone(),
            href: Route::BlogPost {
                slug: post.slug.clone(),
            }
            .href(locale),
            date: post.date.clone(),
            excerpt_html: post.excerpt.rendered.clone(),
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub ctx: PageContext,
    pub posts: Vec<PostCardView>,
}

/// Posts per blog index page.
const POSTS_PER_PAGE: u32 = 9;

/// Display the blog index.
///
/// A CMS failure degrades to an empty list.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
) -> impl IntoResponse {
    let posts = state
        .queries()
        .posts(locale, 1, POSTS_PER_PAGE)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "blog posts unavailable, rendering empty");
            Vec::new()
        });

    let ctx = PageContext::build(&state, locale, &Route::Blog, session.as_ref()).await;

    BlogIndexTemplate {
        posts: posts
            .iter()
            .map(|p| PostCardView::from_post(p, locale))
            .collect(),
        ctx,
    }
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub date: String,
    pub content_html: String,
}

/// Display a single blog post by slug.
///
/// # Errors
///
/// Renders the localized error page if the CMS is unavailable.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    ActiveLocale(locale): ActiveLocale,
    OptionalSession(session): OptionalSession,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, PageError> {
    let post = state
        .queries()
        .post(locale, &slug)
        .await
        .map_err(|err| PageError::upstream(err, locale))?;

    let Some(post) = post else {
        let ctx = PageContext::build(&state, locale, &Route::Blog, session.as_ref()).await;
        return Ok((StatusCode::NOT_FOUND, ErrorTemplate::not_found(ctx)).into_response());
    };

    let route = Route::BlogPost {
        slug: post.slug.clone(),
    };
    let ctx = PageContext::build(&state, locale, &route, session.as_ref()).await;

    Ok(BlogShowTemplate {
        ctx,
        title: post.title.rendered,
        date: post.date,
        content_html: post.content.rendered,
    }
    .into_response())
}
