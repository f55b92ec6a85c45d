//! Cached remote-data access for route handlers.
//!
//! `Queries` ties the key factories, the cache, and the two upstream clients
//! together: handlers ask for data by meaning ("the footer menu", "this
//! search page") and never touch keys, freshness windows, or retries
//! directly. Session-scoped operations (login, orders) bypass the cache and
//! go straight to the catalog client.

use velora_core::Locale;
use velora_core::query_key::{brand_keys, product_keys, wordpress_keys};

use crate::cache::{CachedValue, FetchError, QueryCache};
use crate::catalog::types::{Brand, Product, SearchParams, SearchResponse, Suggestion};
use crate::catalog::{CatalogClient, freshness as catalog_freshness};
use crate::wordpress::types::{WpMenuItem, WpPage, WpPost};
use crate::wordpress::{WordPressClient, freshness as wp_freshness};

/// Cached, typed access to the two upstream APIs.
#[derive(Clone)]
pub struct Queries {
    cache: QueryCache,
    catalog: CatalogClient,
    wordpress: WordPressClient,
}

impl Queries {
    /// Assemble the query layer from its injected parts.
    #[must_use]
    pub const fn new(cache: QueryCache, catalog: CatalogClient, wordpress: WordPressClient) -> Self {
        Self {
            cache,
            catalog,
            wordpress,
        }
    }

    /// The underlying catalog client, for uncached session-scoped calls.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// The cache itself, for invalidation.
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// A product search result page.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn search_products(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse, FetchError> {
        let key = product_keys::search(
            params.query.as_deref(),
            params.brand.as_deref(),
            params.sort.as_deref(),
            params.page,
            params.page_size,
        );
        let catalog = self.catalog.clone();
        let params = params.clone();
        let value = self
            .cache
            .get_or_fetch(key.clone(), catalog_freshness::SEARCH, move || {
                let catalog = catalog.clone();
                let params = params.clone();
                async move {
                    catalog
                        .search_products(&params)
                        .await
                        .map(|r| CachedValue::Search(Box::new(r)))
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Search(response) => Ok(*response),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// A product by slug; `None` when the catalog has no such product.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn product(&self, slug: &str) -> Result<Option<Product>, FetchError> {
        let key = product_keys::detail(slug);
        let catalog = self.catalog.clone();
        let slug = slug.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), catalog_freshness::PRODUCT, move || {
                let catalog = catalog.clone();
                let slug = slug.clone();
                async move {
                    catalog
                        .get_product(&slug)
                        .await
                        .map(|p| CachedValue::Product(p.map(Box::new)))
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Product(product) => Ok(product.map(|p| *p)),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// Autocomplete suggestions for a prefix.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn suggestions(&self, prefix: &str) -> Result<Vec<Suggestion>, FetchError> {
        let key = product_keys::suggest(prefix);
        let catalog = self.catalog.clone();
        let prefix = prefix.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), catalog_freshness::SUGGEST, move || {
                let catalog = catalog.clone();
                let prefix = prefix.clone();
                async move {
                    catalog
                        .suggest(&prefix)
                        .await
                        .map(CachedValue::Suggestions)
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Suggestions(suggestions) => Ok(suggestions),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// The full brand list.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn brands(&self) -> Result<Vec<Brand>, FetchError> {
        let key = brand_keys::list();
        let catalog = self.catalog.clone();
        let value = self
            .cache
            .get_or_fetch(key.clone(), catalog_freshness::BRANDS, move || {
                let catalog = catalog.clone();
                async move {
                    catalog
                        .list_brands()
                        .await
                        .map(CachedValue::Brands)
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Brands(brands) => Ok(brands),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// A brand by slug; `None` when the catalog has no such brand.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn brand(&self, slug: &str) -> Result<Option<Brand>, FetchError> {
        let key = brand_keys::detail(slug);
        let catalog = self.catalog.clone();
        let slug = slug.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), catalog_freshness::BRANDS, move || {
                let catalog = catalog.clone();
                let slug = slug.clone();
                async move {
                    catalog
                        .get_brand(&slug)
                        .await
                        .map(|b| CachedValue::Brand(b.map(Box::new)))
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Brand(brand) => Ok(brand.map(|b| *b)),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    // =========================================================================
    // WordPress
    // =========================================================================

    /// A CMS page by slug; `None` when no page matches.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn page(&self, locale: Locale, slug: &str) -> Result<Option<WpPage>, FetchError> {
        let key = wordpress_keys::page(locale, slug);
        let wordpress = self.wordpress.clone();
        let slug = slug.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), wp_freshness::PAGE, move || {
                let wordpress = wordpress.clone();
                let slug = slug.clone();
                async move {
                    wordpress
                        .get_page(locale, &slug)
                        .await
                        .map(|p| CachedValue::Page(p.map(Box::new)))
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Page(page) => Ok(page.map(|p| *p)),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// A page of blog posts (1-based `page`).
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn posts(
        &self,
        locale: Locale,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<WpPost>, FetchError> {
        let key = wordpress_keys::posts(locale, page, per_page);
        let wordpress = self.wordpress.clone();
        let value = self
            .cache
            .get_or_fetch(key.clone(), wp_freshness::POSTS, move || {
                let wordpress = wordpress.clone();
                async move {
                    wordpress
                        .list_posts(locale, page, per_page)
                        .await
                        .map(CachedValue::Posts)
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Posts(posts) => Ok(posts),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// A blog post by slug; `None` when no post matches.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn post(&self, locale: Locale, slug: &str) -> Result<Option<WpPost>, FetchError> {
        let key = wordpress_keys::post(locale, slug);
        let wordpress = self.wordpress.clone();
        let slug = slug.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), wp_freshness::POSTS, move || {
                let wordpress = wordpress.clone();
                let slug = slug.clone();
                async move {
                    wordpress
                        .get_post(locale, &slug)
                        .await
                        .map(|p| CachedValue::Post(p.map(Box::new)))
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Post(post) => Ok(post.map(|p| *p)),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }

    /// The items of a named navigation menu; empty when the menu is not
    /// configured upstream.
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the fetch fails.
    pub async fn menu(&self, locale: Locale, slug: &str) -> Result<Vec<WpMenuItem>, FetchError> {
        let key = wordpress_keys::menu(locale, slug);
        let wordpress = self.wordpress.clone();
        let slug = slug.to_string();
        let value = self
            .cache
            .get_or_fetch(key.clone(), wp_freshness::MENU, move || {
                let wordpress = wordpress.clone();
                let slug = slug.clone();
                async move {
                    wordpress
                        .get_menu(locale, &slug)
                        .await
                        .map(CachedValue::Menu)
                        .map_err(FetchError::from)
                }
            })
            .await?;

        match value {
            CachedValue::Menu(items) => Ok(items),
            _ => Err(FetchError::KindMismatch(key)),
        }
    }
}
