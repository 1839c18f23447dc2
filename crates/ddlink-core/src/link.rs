use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use url::Url;

/// Redirector domains whose links hide the real download behind an
/// interstitial page.
pub const DEFAULT_REDIRECTOR_DOMAINS: &[&str] =
    &["dl-protect.link", "dl-protect.net", "dl-protect.org"];

/// A normalized hostname: lower-cased, with any `www.` prefix stripped.
///
/// Used as the key for host availability tracking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host(String);

impl Host {
    /// Normalizes a raw hostname.
    pub fn new(host: impl AsRef<str>) -> Self {
        let host = host.as_ref().to_ascii_lowercase();
        match host.strip_prefix("www.") {
            Some(stripped) => Self(stripped.to_string()),
            None => Self(host),
        }
    }

    /// Extracts the host of a link.
    ///
    /// Returns `None` if the link is not a parseable URL or has no host.
    pub fn from_link(link: &str) -> Option<Self> {
        let url = Url::parse(link).ok()?;
        url.host_str().map(Host::new)
    }

    /// Returns the host as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of known redirector domains.
///
/// A link is *protected* when its host equals one of the domains or is a
/// subdomain of one. Every other link is *direct*.
#[derive(Clone, Debug)]
pub struct RedirectorDomains {
    domains: Arc<[String]>,
}

impl RedirectorDomains {
    /// Creates a domain set from the given domains.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains: Vec<String> = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            domains: domains.into(),
        }
    }

    /// Returns the configured domains.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Checks a bare hostname against the domain set (exact or suffix match).
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Returns `true` if the link points at a redirector domain.
    ///
    /// Unparseable links are never protected.
    pub fn is_protected(&self, link: &str) -> bool {
        Url::parse(link)
            .ok()
            .and_then(|url| url.host_str().map(|host| self.matches_host(host)))
            .unwrap_or(false)
    }

    /// Strips redirector tracking parameters from a link.
    ///
    /// Protected links are reduced to `scheme://host/path`; every other link,
    /// including unparseable ones, is returned unchanged. Cleaning is
    /// idempotent.
    pub fn clean(&self, link: &str) -> String {
        let Ok(mut url) = Url::parse(link) else {
            return link.to_string();
        };
        let protected = url.host_str().is_some_and(|host| self.matches_host(host));
        if !protected {
            return link.to_string();
        }
        url.set_query(None);
        url.set_fragment(None);
        url.to_string()
    }
}

impl Default for RedirectorDomains {
    fn default() -> Self {
        Self::new(DEFAULT_REDIRECTOR_DOMAINS)
    }
}
