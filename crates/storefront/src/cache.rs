//! Remote-data cache keyed by [`QueryKey`].
//!
//! Semantics follow the classic client-cache model:
//!
//! - every entry carries a per-kind *freshness* window; a fresh hit is
//!   served without touching the network, a stale hit is refetched;
//! - entries unused for longer than the fixed eviction window are dropped
//!   regardless of freshness;
//! - concurrent callers for the same key are coalesced into a single
//!   in-flight fetch (a property of `moka`'s `try_get_with`);
//! - the loader runs under a bounded exponential-backoff retry policy that
//!   gives up immediately on 4xx client errors.
//!
//! The cache is an explicitly constructed object injected through
//! [`crate::state::AppState`] - there is no global instance. It holds only
//! locale-keyed public catalog and CMS data; session-scoped data is never
//! cached.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use thiserror::Error;
use velora_core::QueryKey;

use crate::catalog::CatalogError;
use crate::catalog::types::{Brand, Product, SearchResponse, Suggestion};
use crate::retry::{self, RetryConfig};
use crate::wordpress::WordPressError;
use crate::wordpress::types::{WpMenuItem, WpPage, WpPost};

/// Eviction window for unused entries (the "gc time").
const EVICT_AFTER: Duration = Duration::from_secs(30 * 60);

/// Maximum number of cached entries.
const MAX_ENTRIES: u64 = 1024;

/// A cached remote-data result.
///
/// One variant per fetch kind; the key factories and the variants are in
/// one-to-one correspondence. "Not found" results are cached too - a 404 is
/// an answer, not a failure.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Search(Box<SearchResponse>),
    Product(Option<Box<Product>>),
    Brands(Vec<Brand>),
    Brand(Option<Box<Brand>>),
    Suggestions(Vec<Suggestion>),
    Page(Option<Box<WpPage>>),
    Posts(Vec<WpPost>),
    Post(Option<Box<WpPost>>),
    Menu(Vec<WpMenuItem>),
}

/// Error produced by a cached fetch.
///
/// Clonable (via `Arc`-wrapped sources) so a single failed in-flight fetch
/// can be reported to every coalesced caller.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("catalog error: {0}")]
    Catalog(Arc<CatalogError>),

    #[error("WordPress error: {0}")]
    WordPress(Arc<WordPressError>),

    /// A key resolved to a value of a different kind. Indicates a factory /
    /// variant mismatch bug, not an upstream condition.
    #[error("cached value kind mismatch for key {0}")]
    KindMismatch(QueryKey),
}

impl FetchError {
    /// Whether the underlying failure is transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Catalog(err) => err.is_retryable(),
            Self::WordPress(err) => err.is_retryable(),
            Self::KindMismatch(_) => false,
        }
    }
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(Arc::new(err))
    }
}

impl From<WordPressError> for FetchError {
    fn from(err: WordPressError) -> Self {
        Self::WordPress(Arc::new(err))
    }
}

/// One cache entry: the value plus its freshness window.
#[derive(Debug, Clone)]
struct CachedEntry {
    value: CachedValue,
    fetched_at: Instant,
    fresh_for: Duration,
}

/// The remote-data cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, CachedEntry>,
    retry: RetryConfig,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    /// Create a cache with the standard eviction window and retry policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retry(RetryConfig::upstream())
    }

    /// Create a cache with a custom retry policy (tests use fast delays).
    #[must_use]
    pub fn with_retry(retry: RetryConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(EVICT_AFTER)
            .support_invalidation_closures()
            .build();
        Self { inner, retry }
    }

    /// Look up `key`, fetching through `fetch` on a miss or stale hit.
    ///
    /// Concurrent callers for the same key share one in-flight fetch. The
    /// loader runs under the retry policy; non-retryable errors propagate
    /// after the first attempt.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when the fetch (including retries) fails.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: QueryKey,
        fresh_for: Duration,
        fetch: F,
    ) -> Result<CachedValue, FetchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<CachedValue, FetchError>>,
    {
        if let Some(entry) = self.inner.get(&key).await {
            if entry.fetched_at.elapsed() < entry.fresh_for {
                tracing::debug!(key = %key, "cache hit");
                return Ok(entry.value);
            }
            // Stale: drop the entry so the coalesced fetch below repopulates it.
            tracing::debug!(key = %key, "cache entry stale");
            self.inner.invalidate(&key).await;
        }

        let operation_name = key.to_string();
        let retry_config = self.retry.clone();
        let entry = self
            .inner
            .try_get_with(key, async move {
                let value = retry::with_retry_if(
                    &retry_config,
                    &operation_name,
                    fetch,
                    FetchError::is_retryable,
                )
                .await?;
                Ok::<_, FetchError>(CachedEntry {
                    value,
                    fetched_at: Instant::now(),
                    fresh_for,
                })
            })
            .await
            .map_err(|err: Arc<FetchError>| FetchError::clone(&err))?;

        Ok(entry.value)
    }

    /// Invalidate every entry under a key prefix (e.g. all product data).
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let prefix = prefix.clone();
        if let Err(err) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            tracing::error!(error = %err, "prefix invalidation failed");
        }
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use velora_core::query_key::{brand_keys, product_keys};

    use super::*;

    fn fast_cache() -> QueryCache {
        QueryCache::with_retry(RetryConfig::new(3, Duration::from_millis(5)))
    }

    fn suggestions(n: u32) -> CachedValue {
        CachedValue::Suggestions(vec![Suggestion {
            label: format!("s{n}"),
            slug: None,
            kind: None,
        }])
    }

    #[tokio::test]
    async fn test_fresh_hit_skips_loader() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let value = cache
                .get_or_fetch(
                    product_keys::suggest("la"),
                    Duration::from_secs(60),
                    move || {
                        let calls = calls.clone();
                        async move {
                            let n = calls.fetch_add(1, Ordering::SeqCst);
                            Ok(suggestions(n))
                        }
                    },
                )
                .await
                .unwrap();
            assert!(matches!(value, CachedValue::Suggestions(_)));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));

        let fetch = |calls: Arc<AtomicU32>| {
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    Ok(suggestions(n))
                }
            }
        };

        let key = product_keys::suggest("so");
        let fresh_for = Duration::from_millis(30);

        cache
            .get_or_fetch(key.clone(), fresh_for, fetch(calls.clone()))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        cache
            .get_or_fetch(key, fresh_for, fetch(calls.clone()))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_are_coalesced() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));

        let run = |cache: QueryCache, calls: Arc<AtomicU32>| async move {
            cache
                .get_or_fetch(
                    brand_keys::list(),
                    Duration::from_secs(60),
                    move || {
                        let calls = calls.clone();
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            // Hold the in-flight fetch open so the others pile up on it
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok(CachedValue::Brands(Vec::new()))
                        }
                    },
                )
                .await
        };

        let (a, b, c, d) = tokio::join!(
            run(cache.clone(), calls.clone()),
            run(cache.clone(), calls.clone()),
            run(cache.clone(), calls.clone()),
            run(cache.clone(), calls.clone()),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok() && d.is_ok());

        // All four callers shared one network call
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = cache
            .get_or_fetch(
                product_keys::detail("x"),
                Duration::from_secs(60),
                move || {
                    let calls = calls_clone.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(FetchError::from(CatalogError::Status {
                            status: 400,
                            message: "bad request".to_string(),
                        }))
                    }
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried_up_to_bound() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = cache
            .get_or_fetch(
                product_keys::detail("y"),
                Duration::from_secs(60),
                move || {
                    let calls = calls_clone.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(FetchError::from(CatalogError::Status {
                            status: 502,
                            message: "bad gateway".to_string(),
                        }))
                    }
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));

        let key = product_keys::detail("flaky");
        let fetch = |calls: Arc<AtomicU32>| {
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        Err(FetchError::from(CatalogError::Status {
                            status: 400,
                            message: String::new(),
                        }))
                    } else {
                        Ok(CachedValue::Product(None))
                    }
                }
            }
        };

        assert!(
            cache
                .get_or_fetch(key.clone(), Duration::from_secs(60), fetch(calls.clone()))
                .await
                .is_err()
        );
        // The failure was not cached; the next call fetches again and succeeds
        assert!(
            cache
                .get_or_fetch(key, Duration::from_secs(60), fetch(calls.clone()))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_prefix_invalidation() {
        let cache = fast_cache();
        let calls = Arc::new(AtomicU32::new(0));

        let fetch = |calls: Arc<AtomicU32>| {
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    Ok(suggestions(n))
                }
            }
        };

        let key = product_keys::suggest("lamp");
        cache
            .get_or_fetch(key.clone(), Duration::from_secs(60), fetch(calls.clone()))
            .await
            .unwrap();

        cache.invalidate_prefix(&product_keys::all());
        // Invalidation closures run asynchronously; give moka a moment
        tokio::time::sleep(Duration::from_millis(50)).await;

        cache
            .get_or_fetch(key, Duration::from_secs(60), fetch(calls.clone()))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
