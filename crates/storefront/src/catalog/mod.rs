//! Product catalog API client.
//!
//! A thin typed wrapper over the catalog/search REST backend. Every method
//! issues exactly one outbound request: retries, caching, and coalescing are
//! the responsibility of [`crate::cache::QueryCache`].
//!
//! # Failure policy
//!
//! - A 404 on a single-entity lookup means "not found" and returns
//!   `Ok(None)`, never an error.
//! - Any other non-success status surfaces as [`CatalogError::Status`]
//!   carrying the HTTP status and a truncated body excerpt.
//! - Credential validation treats 401/403 as "invalid credentials"
//!   (`Ok(None)`), not as a failure of the wrapper itself.

pub mod types;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;

use types::{AuthenticatedUser, Brand, Order, Product, SearchParams, SearchResponse, Suggestion};

/// Freshness hints for the cache layer, per fetch kind.
///
/// Search and autocomplete results go stale quickly; detail and brand data
/// is semi-static.
pub mod freshness {
    use std::time::Duration;

    pub const SEARCH: Duration = Duration::from_secs(60);
    pub const SUGGEST: Duration = Duration::from_secs(30);
    pub const PRODUCT: Duration = Duration::from_secs(300);
    pub const BRANDS: Duration = Duration::from_secs(600);
}

/// Errors that can occur when calling the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("catalog API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether retrying this error could succeed. Client errors (4xx) are
    /// deterministic and never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Parse(_) => false,
        }
    }
}

/// Client for the product catalog/search API.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a GET request and parse the body, mapping non-success statuses
    /// to [`CatalogError::Status`].
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
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

    /// Search products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse, CatalogError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("page_size", params.page_size.to_string()),
        ];
        if let Some(q) = &params.query {
            query.push(("q", q.clone()));
        }
        if let Some(brand) = &params.brand {
            query.push(("brand", brand.clone()));
        }
        if let Some(sort) = &params.sort {
            query.push(("sort", sort.clone()));
        }

        self.get_json("/v1/products/search", &query).await
    }

    /// Get a product by slug. A 404 means the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses other than 404.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let response = self
            .client
            .get(format!("{}/v1/products/{slug}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(Some(serde_json::from_str(&body)?))
    }

    /// List all brands.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        self.get_json("/v1/brands", &[]).await
    }

    /// Get a brand by slug. A 404 means the brand does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses other than 404.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_brand(&self, slug: &str) -> Result<Option<Brand>, CatalogError> {
        let response = self
            .client
            .get(format!("{}/v1/brands/{slug}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Autocomplete suggestions for a search prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn suggest(&self, prefix: &str) -> Result<Vec<Suggestion>, CatalogError> {
        self.get_json("/v1/suggest", &[("q", prefix.to_string())])
            .await
    }

    /// Validate credentials against the catalog API.
    ///
    /// Returns `Ok(None)` when the API rejects the credentials (401/403);
    /// the caller renders that as a form error, not a server failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with an
    /// unexpected status.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, CatalogError> {
        let response = self
            .client
            .post(format!("{}/v1/auth/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(Some(serde_json::from_str(&body)?))
    }

    /// List a user's orders. Not cached: order data is session-scoped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_orders(&self, user_id: &str) -> Result<Vec<Order>, CatalogError> {
        self.get_json(&format!("/v1/users/{user_id}/orders"), &[])
            .await
    }
}

/// Build a status error with a truncated body excerpt for diagnostics.
fn status_error(status: StatusCode, body: &str) -> CatalogError {
    tracing::error!(
        status = %status,
        body = %body.chars().take(500).collect::<String>(),
        "catalog API returned non-success status"
    );
    CatalogError::Status {
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

    fn product_json(slug: &str) -> serde_json::Value {
        serde_json::json!({
            "slug": slug,
            "name": "Aurora Lamp",
            "description": "A lamp.",
            "brand": { "slug": "acme", "name": "Acme" },
            "price": { "amount": "59.00", "currency": "EUR" },
            "images": [{ "url": "https://cdn.example.com/lamp.jpg", "alt": "Lamp" }],
            "in_stock": true
        })
    }

    #[tokio::test]
    async fn test_search_echoes_page_and_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products/search"))
            .and(query_param("page", "0"))
            .and(query_param("page_size", "21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [product_json("aurora-lamp")],
                "total": 42,
                "page": 0,
                "page_size": 21,
                "total_pages": 2
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        let response = client.search_products(&SearchParams::default()).await.unwrap();

        assert_eq!(response.page, 0);
        assert_eq!(response.page_size, 21);
        assert_eq!(response.total, 42);
        // total_pages is consistent with total and page_size
        assert_eq!(
            u64::from(response.total_pages),
            response.total.div_ceil(u64::from(response.page_size))
        );
    }

    #[tokio::test]
    async fn test_get_product_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        assert_eq!(client.get_product("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products/aurora-lamp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json("aurora-lamp")))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        let product = client.get_product("aurora-lamp").await.unwrap().unwrap();
        assert_eq!(product.name, "Aurora Lamp");
        assert_eq!(product.brand.unwrap().slug, "acme");
    }

    #[tokio::test]
    async fn test_server_error_is_typed_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        let err = client
            .search_products(&SearchParams::default())
            .await
            .unwrap_err();

        match err {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("upstream down"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        assert_eq!(client.login("a@b.com", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_success_returns_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1",
                "email": "ana@example.com",
                "name": "Ana"
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(reqwest::Client::new(), &server.uri());
        let user = client.login("ana@example.com", "pw").await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.name.as_deref(), Some("Ana"));
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_retryability() {
        assert!(
            CatalogError::Status {
                status: 502,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !CatalogError::Status {
                status: 404,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !CatalogError::Status {
                status: 400,
                message: String::new()
            }
            .is_retryable()
        );
    }
}
