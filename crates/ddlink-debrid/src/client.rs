use crate::api::{
    ApiResponse, RedirectorData, UnlockData, UserData, REDIRECTOR_PATH, UNLOCK_PATH, USER_PATH,
};
use crate::error::DebridError;
use async_trait::async_trait;
use ddlink_cache::HostAvailability;
use ddlink_core::{Host, RedirectorResolver, UnlockedLink, Unlocker};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://api.alldebrid.com/v4";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Configures an [`AllDebridClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct DebridConfig {
    /// API key. `None` or an empty key leaves the client unconfigured.
    #[builder(default, setter(strip_option, into))]
    pub api_key: Option<String>,
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    /// Per-request timeout. A timed out call counts as a failure and is not
    /// retried.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

/// AllDebrid API client.
#[derive(Clone)]
pub struct AllDebridClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    hosts: Arc<dyn HostAvailability>,
}

impl std::fmt::Debug for AllDebridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllDebridClient")
            .field("configured", &self.is_configured())
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AllDebridClient {
    /// Creates a client sharing the given host availability tracker.
    pub fn new(
        config: DebridConfig,
        hosts: Arc<dyn HostAvailability>,
    ) -> Result<Self, DebridError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DebridError::Client)?;

        Ok(Self {
            http,
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            hosts,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn api_key(&self) -> Result<&str, DebridError> {
        self.api_key.as_deref().ok_or(DebridError::Unconfigured)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DebridError> {
        let status = response.status();
        let body = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| DebridError::Decode(format!("HTTP {status}: {e}")))?;
        envelope.into_result()
    }

    async fn post_link<T: DeserializeOwned>(&self, path: &str, link: &str) -> Result<T, DebridError> {
        let api_key = self.api_key()?;
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(api_key)
            .form(&[("link", link)])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Expands a protected link through the redirector endpoint.
    ///
    /// Returns `[link]` when unconfigured or on any failure.
    pub async fn redirector(&self, link: &str) -> Vec<String> {
        if !self.is_configured() {
            return vec![link.to_string()];
        }

        trace!(link = %link, "Resolving redirector link");
        match self.post_link::<RedirectorData>(REDIRECTOR_PATH, link).await {
            Ok(data) if !data.links.is_empty() => {
                info!(link = %link, count = data.links.len(), "Redirector resolved link");
                data.links
            }
            Ok(_) => {
                debug!(link = %link, "Redirector returned no links");
                vec![link.to_string()]
            }
            Err(e) => {
                warn!(link = %link, adapter = "redirector", error = %e, "Redirector resolution failed");
                vec![link.to_string()]
            }
        }
    }

    /// Unlocks a hosting link.
    ///
    /// Returns `None` when unconfigured, when the link's host is currently
    /// marked unavailable (no request is made), or on any failure. Host-level
    /// API errors mark the host unavailable before returning.
    pub async fn unlock_link(&self, link: &str) -> Option<UnlockedLink> {
        if !self.is_configured() {
            return None;
        }

        let host = Host::from_link(link);
        if let Some(host) = &host {
            if self.hosts.is_unavailable(host) {
                info!(link = %link, host = %host, "Skipping unlock, host is temporarily unavailable");
                return None;
            }
        }

        trace!(link = %link, "Unlocking link");
        match self.post_link::<UnlockData>(UNLOCK_PATH, link).await {
            Ok(data) => {
                let unlocked = data.into_unlocked();
                match &unlocked {
                    Some(unlocked) => debug!(link = %link, unlocked = %unlocked.link, "Link unlocked"),
                    None => warn!(link = %link, "Unlock response carried no link"),
                }
                unlocked
            }
            Err(e) => {
                let host_label = host.as_ref().map(Host::as_str).unwrap_or("-");
                warn!(
                    link = %link,
                    host = %host_label,
                    adapter = "unlock",
                    code = e.code().unwrap_or("-"),
                    error = %e,
                    "Unlock failed"
                );
                if let Some(host) = host.as_ref().filter(|_| e.is_host_unavailable()) {
                    self.hosts.mark_unavailable(host);
                }
                None
            }
        }
    }

    /// Checks whether the configured account is premium.
    ///
    /// Returns `false` when unconfigured or on any failure.
    pub async fn is_premium(&self) -> bool {
        let Ok(api_key) = self.api_key() else {
            return false;
        };

        let response = match self
            .http
            .get(self.endpoint(USER_PATH))
            .bearer_auth(api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Account status request failed");
                return false;
            }
        };

        match Self::decode::<UserData>(response).await {
            Ok(data) => data.user.is_premium,
            Err(e) => {
                warn!(error = %e, "Account status check failed");
                false
            }
        }
    }
}

#[async_trait]
impl Unlocker for AllDebridClient {
    fn is_configured(&self) -> bool {
        AllDebridClient::is_configured(self)
    }

    async fn unlock(&self, link: &str) -> ddlink_core::Result<Option<UnlockedLink>> {
        Ok(self.unlock_link(link).await)
    }
}

#[async_trait]
impl RedirectorResolver for AllDebridClient {
    async fn resolve_redirector(&self, link: &str) -> ddlink_core::Result<Vec<String>> {
        Ok(self.redirector(link).await)
    }
}
