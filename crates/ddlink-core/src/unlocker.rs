use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A direct, authenticated download link produced by a debrid service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedLink {
    /// The directly fetchable URL.
    pub link: String,
    pub filename: Option<String>,
    /// The hosting site the debrid service recognised.
    pub host: Option<String>,
    /// Size in bytes, when reported.
    pub filesize: Option<u64>,
}

impl UnlockedLink {
    /// Creates an unlocked link without any metadata.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            filename: None,
            host: None,
            filesize: None,
        }
    }
}

/// Turns a hosting-site link into a direct download link.
#[async_trait]
pub trait Unlocker: Send + Sync + 'static {
    /// Whether a credential is available.
    ///
    /// An unconfigured unlocker is a recognised degraded mode, not an error.
    fn is_configured(&self) -> bool;

    /// Unlocks a single link.
    ///
    /// Returns `Ok(None)` when the service cannot unlock the link (including
    /// when it is unconfigured or the host is currently marked unavailable).
    async fn unlock(&self, link: &str) -> Result<Option<UnlockedLink>>;
}

/// Expands a protected (redirector) link into candidate links.
#[async_trait]
pub trait RedirectorResolver: Send + Sync + 'static {
    /// Resolves a protected link.
    ///
    /// When no progress can be made the input link is returned as the only
    /// candidate; callers compare the first candidate with the input to
    /// detect that case.
    async fn resolve_redirector(&self, link: &str) -> Result<Vec<String>>;
}
