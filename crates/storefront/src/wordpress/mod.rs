//! WordPress content API client.
//!
//! A thin typed wrapper over the WordPress REST API. Content is localized
//! upstream (Polylang-style `lang` query parameter), so every method takes
//! the active locale. Like the catalog client, each method issues exactly
//! one outbound request.
//!
//! # Failure policy
//!
//! - A slug query returning an empty array, or a 404, means "no such page
//!   or post" and returns `Ok(None)`.
//! - A 404 on a menu lookup means "menu not configured" and returns an
//!   empty item list; the footer renders without it.
//! - Any other non-success status surfaces as [`WordPressError::Status`].

pub mod types;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;
use velora_core::Locale;

use types::{WpMenu, WpMenuItem, WpPage, WpPost};

/// Freshness hints for the cache layer, per fetch kind.
///
/// CMS content changes rarely; menus and legal pages are effectively static
/// between editorial deployments.
pub mod freshness {
    use std::time::Duration;

    pub const PAGE: Duration = Duration::from_secs(900);
    pub const POSTS: Duration = Duration::from_secs(300);
    pub const MENU: Duration = Duration::from_secs(900);
}

/// Errors that can occur when calling the WordPress API.
#[derive(Debug, Error)]
pub enum WordPressError {
    /// HTTP request failed (connection, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("WordPress API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WordPressError {
    /// Whether retrying this error could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Parse(_) => false,
        }
    }
}

/// Client for the WordPress content API.
#[derive(Clone)]
pub struct WordPressClient {
    client: reqwest::Client,
    base_url: String,
}

impl WordPressClient {
    /// Create a new WordPress API client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WordPressError> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Get a CMS page by slug. Returns `Ok(None)` when no page matches.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses other than 404.
    #[instrument(skip(self), fields(slug = %slug, locale = %locale))]
    pub async fn get_page(
        &self,
        locale: Locale,
        slug: &str,
    ) -> Result<Option<WpPage>, WordPressError> {
        let pages: Vec<WpPage> = match self
            .get_json(
                "/wp-json/wp/v2/pages",
                &[
                    ("slug", slug.to_string()),
                    ("lang", locale.as_str().to_string()),
                ],
            )
            .await
        {
            Ok(pages) => pages,
            Err(WordPressError::Status { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };

        Ok(pages.into_iter().next())
    }

    /// List published blog posts, newest first. `page` is 1-based, as the
    /// WordPress API expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    #[instrument(skip(self), fields(locale = %locale))]
    pub async fn list_posts(
        &self,
        locale: Locale,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<WpPost>, WordPressError> {
        self.get_json(
            "/wp-json/wp/v2/posts",
            &[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("lang", locale.as_str().to_string()),
            ],
        )
        .await
    }

    /// Get a blog post by slug. Returns `Ok(None)` when no post matches.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses other than 404.
    #[instrument(skip(self), fields(slug = %slug, locale = %locale))]
    pub async fn get_post(
        &self,
        locale: Locale,
        slug: &str,
    ) -> Result<Option<WpPost>, WordPressError> {
        let posts: Vec<WpPost> = match self
            .get_json(
                "/wp-json/wp/v2/posts",
                &[
                    ("slug", slug.to_string()),
                    ("lang", locale.as_str().to_string()),
                ],
            )
            .await
        {
            Ok(posts) => posts,
            Err(WordPressError::Status { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };

        Ok(posts.into_iter().next())
    }

    /// Get the items of a named navigation menu.
    ///
    /// A 404 means the menu is not configured for this site or locale; the
    /// caller gets an empty list and renders without it.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses other than 404.
    #[instrument(skip(self), fields(slug = %slug, locale = %locale))]
    pub async fn get_menu(
        &self,
        locale: Locale,
        slug: &str,
    ) -> Result<Vec<WpMenuItem>, WordPressError> {
        let response = self
            .client
            .get(format!("{}/wp-json/menus/v1/menus/{slug}", self.base_url))
            .query(&[("lang", locale.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let menu: WpMenu = serde_json::from_str(&body)?;
        Ok(menu.items)
    }
}

/// Build a status error with a truncated body excerpt for diagnostics.
fn status_error(status: StatusCode, body: &str) -> WordPressError {
    tracing::error!(
        status = %status,
        body = %body.chars().take(500).collect::<String>(),
        "WordPress API returned non-success status"
    );
    WordPressError::Status {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_get_page_by_slug() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/pages"))
            .and(query_param("slug", "privacy-policy"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 12,
                "slug": "privacy-policy",
                "title": { "rendered": "Privacy Policy" },
                "content": { "rendered": "<p>We care.</p>" }
            }])))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        let page = client
            .get_page(Locale::En, "privacy-policy")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.title.rendered, "Privacy Policy");
    }

    #[tokio::test]
    async fn test_get_page_empty_result_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        assert_eq!(client.get_page(Locale::Es, "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_menu_not_found_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/menus/v1/menus/footer"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        let items = client.get_menu(Locale::Es, "footer").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_get_menu_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/menus/v1/menus/footer"))
            .and(query_param("lang", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "title": "À propos", "url": "https://cms.example.com/fr/a-propos" },
                    { "title": "Presse", "url": "https://cms.example.com/fr/presse" }
                ]
            })))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        let items = client.get_menu(Locale::Fr, "footer").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "À propos");
    }

    #[tokio::test]
    async fn test_server_error_is_typed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        let err = client.list_posts(Locale::En, 1, 10).await.unwrap_err();
        assert!(matches!(err, WordPressError::Status { status: 500, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_list_posts_parses_rendered_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/posts"))
            .and(query_param("per_page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 7,
                "slug": "summer-launch",
                "date": "2024-06-01T08:00:00",
                "title": { "rendered": "Summer launch" },
                "excerpt": { "rendered": "<p>New arrivals.</p>" },
                "content": { "rendered": "<p>Everything new.</p>" }
            }])))
            .mount(&server)
            .await;

        let client = WordPressClient::new(reqwest::Client::new(), &server.uri());
        let posts = client.list_posts(Locale::En, 1, 3).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "summer-launch");
        assert_eq!(posts[0].title.rendered, "Summer launch");
    }
}
