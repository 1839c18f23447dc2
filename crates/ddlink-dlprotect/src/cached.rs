use async_trait::async_trait;
use ddlink_core::{CacheStats, FallbackResolver, RedirectorDomains};
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Configuration for a [`CachedResolver`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct CachedResolverConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = 10_000)]
    pub max_capacity: u64,
    /// Time-to-live for cache entries.
    #[builder(default = Duration::from_secs(60 * 60))]
    pub ttl: Duration,
    /// Used to decide whether a resolution actually escaped the redirector.
    #[builder(default)]
    pub domains: RedirectorDomains,
}

impl Default for CachedResolverConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A [`FallbackResolver`] decorator that caches successful resolutions.
///
/// Only results that differ from the input and are no longer protected are
/// kept; a failed resolution is retried on the next call. Concurrent lookups
/// of the same link coalesce into a single call to the inner resolver.
#[derive(Debug, Clone)]
pub struct CachedResolver<F> {
    inner: F,
    cache: Cache<String, String>,
    domains: RedirectorDomains,
}

impl<F: FallbackResolver> CachedResolver<F> {
    pub fn new(inner: F, config: CachedResolverConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        Self {
            inner,
            cache,
            domains: config.domains,
        }
    }

    /// Returns a reference to the inner resolver.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn escaped(&self, link: &str, resolved: &str) -> bool {
        resolved != link && !self.domains.is_protected(resolved)
    }
}

#[async_trait]
impl<F: FallbackResolver> FallbackResolver for CachedResolver<F> {
    async fn resolve(&self, link: &str) -> String {
        trace!(link = %link, "Resolving protected link with local cache");

        // An unresolved result travels through the error channel so that it
        // is returned to every waiter without being cached.
        let result = self
            .cache
            .try_get_with(link.to_string(), async {
                let resolved = self.inner.resolve(link).await;
                if self.escaped(link, &resolved) {
                    Ok(resolved)
                } else {
                    Err(resolved)
                }
            })
            .await;

        match result {
            Ok(resolved) => {
                debug!(link = %link, resolved = %resolved, "Fallback resolution served");
                resolved
            }
            Err(unresolved) => {
                debug!(link = %link, "Fallback resolution not cached");
                unresolved.as_ref().clone()
            }
        }
    }

    async fn cache_stats(&self) -> Option<CacheStats> {
        self.inner.cache_stats().await
    }

    async fn shutdown(&self) {
        self.cache.invalidate_all();
        debug!("Cleared local fallback resolution cache");
        self.inner.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Resolver that maps every link to a fixed answer and counts calls.
    #[derive(Clone)]
    struct CountingResolver {
        answer: Option<String>,
        calls: Arc<AtomicUsize>,
        shutdowns: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl CountingResolver {
        fn new(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(str::to_string),
                calls: Arc::new(AtomicUsize::new(0)),
                shutdowns: Arc::new(AtomicUsize::new(0)),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl FallbackResolver for CountingResolver {
        async fn resolve(&self, link: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.answer.clone().unwrap_or_else(|| link.to_string())
        }

        async fn cache_stats(&self) -> Option<CacheStats> {
            Some(CacheStats {
                entries: 3,
                directory: "/tmp/cache".to_string(),
            })
        }

        async fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    const LINK: &str = "https://dl-protect.link/abc";

    #[tokio::test]
    async fn successful_resolution_is_cached() {
        let inner = CountingResolver::new(Some("https://host2.com/file"));
        let calls = Arc::clone(&inner.calls);
        let resolver = CachedResolver::new(inner, CachedResolverConfig::default());

        assert_eq!(resolver.resolve(LINK).await, "https://host2.com/file");
        assert_eq!(resolver.resolve(LINK).await, "https://host2.com/file");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unresolved_link_is_not_cached() {
        let inner = CountingResolver::new(None);
        let calls = Arc::clone(&inner.calls);
        let resolver = CachedResolver::new(inner, CachedResolverConfig::default());

        assert_eq!(resolver.resolve(LINK).await, LINK);
        assert_eq!(resolver.resolve(LINK).await, LINK);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn still_protected_result_is_not_cached() {
        let inner = CountingResolver::new(Some("https://dl-protect.net/next"));
        let calls = Arc::clone(&inner.calls);
        let resolver = CachedResolver::new(inner, CachedResolverConfig::default());

        assert_eq!(resolver.resolve(LINK).await, "https://dl-protect.net/next");
        assert_eq!(resolver.resolve(LINK).await, "https://dl-protect.net/next");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_lookups_coalesce() {
        let mut inner = CountingResolver::new(Some("https://host2.com/file"));
        inner.delay = Duration::from_millis(50);
        let calls = Arc::clone(&inner.calls);
        let resolver = Arc::new(CachedResolver::new(inner, CachedResolverConfig::default()));

        let mut handles = vec![];
        for _ in 0..10 {
            let resolver = Arc::clone(&resolver);
            handles.push(tokio::spawn(async move { resolver.resolve(LINK).await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), "https://host2.com/file");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_clears_cache_and_delegates() {
        let inner = CountingResolver::new(Some("https://host2.com/file"));
        let calls = Arc::clone(&inner.calls);
        let shutdowns = Arc::clone(&inner.shutdowns);
        let resolver = CachedResolver::new(inner, CachedResolverConfig::default());

        resolver.resolve(LINK).await;
        resolver.shutdown().await;
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);

        resolver.resolve(LINK).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cache_stats_come_from_inner() {
        let resolver = CachedResolver::new(
            CountingResolver::new(None),
            CachedResolverConfig::default(),
        );
        let stats = resolver.cache_stats().await.unwrap();
        assert_eq!(stats.entries, 3);
        assert_eq!(resolver.inner().calls.load(Ordering::SeqCst), 0);
    }
}
