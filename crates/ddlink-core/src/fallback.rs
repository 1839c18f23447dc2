use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Statistics reported by the fallback resolver's results cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub directory: String,
}

/// A browser-automation resolver for protected links.
///
/// Used when the API-based path is unconfigured or fails. Implementations may
/// serialise requests internally and are not expected to be fast under load.
#[async_trait]
pub trait FallbackResolver: Send + Sync + 'static {
    /// Resolves a protected link.
    ///
    /// Never fails: in the worst case the input link is returned.
    async fn resolve(&self, link: &str) -> String;

    /// Returns the results cache statistics, or `None` when unavailable.
    async fn cache_stats(&self) -> Option<CacheStats>;

    /// Teardown hook invoked once at process shutdown.
    async fn shutdown(&self) {}
}
