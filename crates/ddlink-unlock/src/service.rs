use ddlink_core::{
    FallbackResolver, RedirectorDomains, RedirectorResolver, Resolution, UnlockError, Unlocker,
};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use typed_builder::TypedBuilder;

/// Maximum number of redirector expansions followed for one input link.
pub const DEFAULT_MAX_HOPS: usize = 5;

/// Result of evaluating the decision policy on one link of the chain.
enum Step {
    Done(Resolution),
    /// The redirector revealed a new link; evaluate the policy again on it.
    Hop(String),
}

/// Orchestrates link resolution over the debrid unlocker, the redirector
/// resolver and the fallback resolver.
///
/// The service holds no state of its own; cloning it is cheap and every
/// clone shares the same collaborators.
#[derive(Clone, TypedBuilder)]
pub struct UnlockService {
    unlocker: Arc<dyn Unlocker>,
    redirector: Arc<dyn RedirectorResolver>,
    fallback: Arc<dyn FallbackResolver>,
    #[builder(default)]
    domains: RedirectorDomains,
    #[builder(default = DEFAULT_MAX_HOPS)]
    max_hops: usize,
}

impl std::fmt::Debug for UnlockService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockService")
            .field("debrid_configured", &self.unlocker.is_configured())
            .field("domains", &self.domains)
            .field("max_hops", &self.max_hops)
            .finish_non_exhaustive()
    }
}

impl UnlockService {
    /// Creates a service with the default redirector domains and hop bound.
    pub fn new(
        unlocker: Arc<dyn Unlocker>,
        redirector: Arc<dyn RedirectorResolver>,
        fallback: Arc<dyn FallbackResolver>,
    ) -> Self {
        Self::builder()
            .unlocker(unlocker)
            .redirector(redirector)
            .fallback(fallback)
            .build()
    }

    /// Returns the fallback resolver, for observability and teardown.
    pub fn fallback(&self) -> &Arc<dyn FallbackResolver> {
        &self.fallback
    }

    /// Resolves a single link.
    ///
    /// Never fails: when every strategy is exhausted the cleaned input link
    /// is returned as [`Resolution::Passthrough`], so a non-empty input always
    /// yields a non-empty link.
    pub async fn unlock_link(&self, link: &str) -> Resolution {
        let cleaned = self.domains.clean(link);

        if !self.unlocker.is_configured() {
            if self.domains.is_protected(link) {
                info!(link = %link, "Debrid not configured, using fallback resolver");
                let resolved = self.fallback.resolve(link).await;
                return self.classify_fallback(link, resolved, &cleaned);
            }
            trace!(link = %link, "Debrid not configured, passing link through");
            return Resolution::Passthrough(cleaned);
        }

        let mut current = link.to_string();
        for hop in 0..=self.max_hops {
            let step = match self.step(&current, &cleaned).await {
                Ok(step) => step,
                Err(e) => return self.recover(&current, &cleaned, e).await,
            };
            match step {
                Step::Done(resolution) => {
                    debug!(
                        link = %link,
                        hops = hop,
                        resolution = resolution.kind(),
                        result = %resolution,
                        "Link resolution finished"
                    );
                    return resolution;
                }
                Step::Hop(next) => {
                    debug!(link = %link, from = %current, to = %next, hop = hop + 1, "Following redirector");
                    current = next;
                }
            }
        }

        warn!(link = %link, max_hops = self.max_hops, "Redirector chain too long, giving up");
        Resolution::Passthrough(cleaned)
    }

    /// Resolves a batch of links concurrently.
    ///
    /// The result has the same length and order as the input. Each link is
    /// resolved in its own task, so a failure (even a panic) in one never
    /// affects another; a task that does not complete yields the input link.
    pub async fn unlock_links<S: AsRef<str>>(&self, links: &[S]) -> Vec<Resolution> {
        let handles: Vec<_> = links
            .iter()
            .map(|link| {
                let service = self.clone();
                let link = link.as_ref().to_string();
                tokio::spawn(async move { service.unlock_link(&link).await })
            })
            .collect();

        futures::future::join_all(handles)
            .await
            .into_iter()
            .zip(links)
            .map(|(outcome, link)| match outcome {
                Ok(resolution) => resolution,
                Err(e) => {
                    error!(link = %link.as_ref(), error = %e, "Link resolution task failed");
                    Resolution::Passthrough(link.as_ref().to_string())
                }
            })
            .collect()
    }

    async fn step(&self, link: &str, cleaned: &str) -> Result<Step, UnlockError> {
        if self.domains.is_protected(link) {
            let candidates = self.redirector.resolve_redirector(link).await?;
            // Alternate candidates are discarded.
            if let Some(next) = candidates.into_iter().next().filter(|c| c != link) {
                return Ok(Step::Hop(next));
            }

            info!(link = %link, "Redirector made no progress, using fallback resolver");
            let resolved = self.fallback.resolve(link).await;
            if resolved.is_empty() || self.domains.is_protected(&resolved) {
                info!(link = %link, "Fallback resolver could not escape redirector");
                return Ok(Step::Done(Resolution::Passthrough(cleaned.to_string())));
            }

            return match self.unlocker.unlock(&resolved).await? {
                Some(unlocked) => Ok(Step::Done(Resolution::Unlocked(unlocked.link))),
                None => {
                    debug!(link = %link, resolved = %resolved, "Unlock failed, returning fallback result");
                    Ok(Step::Done(Resolution::Resolved(resolved)))
                }
            };
        }

        match self.unlocker.unlock(link).await? {
            Some(unlocked) => Ok(Step::Done(Resolution::Unlocked(unlocked.link))),
            None => {
                info!(link = %link, cleaned = %cleaned, "Unlock failed, returning original link");
                Ok(Step::Done(Resolution::Passthrough(cleaned.to_string())))
            }
        }
    }

    async fn recover(&self, link: &str, cleaned: &str, e: UnlockError) -> Resolution {
        error!(link = %link, error = %e, "Unlock attempt failed");
        if self.domains.is_protected(link) {
            info!(link = %link, "Using fallback resolver after failure");
            let resolved = self.fallback.resolve(link).await;
            return self.classify_fallback(link, resolved, cleaned);
        }
        Resolution::Passthrough(cleaned.to_string())
    }

    fn classify_fallback(&self, link: &str, resolved: String, cleaned: &str) -> Resolution {
        if resolved.is_empty() {
            Resolution::Passthrough(cleaned.to_string())
        } else if resolved != link && !self.domains.is_protected(&resolved) {
            Resolution::Resolved(resolved)
        } else {
            Resolution::Passthrough(resolved)
        }
    }
}
