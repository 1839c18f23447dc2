use crate::error::DlProtectError;
use async_trait::async_trait;
use ddlink_core::{CacheStats, FallbackResolver, RedirectorDomains};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

const RESOLVE_PATH: &str = "/resolve";
const CACHE_STATS_PATH: &str = "/cache/stats";

/// Configures a [`DlProtectClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct DlProtectConfig {
    #[builder(default = DEFAULT_SERVICE_URL.to_string(), setter(into))]
    pub service_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Ask the service to bypass its own results cache.
    #[builder(default = false)]
    pub disable_remote_cache: bool,
    /// Links outside these domains are returned without a request.
    #[builder(default)]
    pub domains: RedirectorDomains,
}

#[derive(Debug, Serialize)]
struct ResolveRequest<'a> {
    url: &'a str,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    success: bool,
    url: Option<String>,
    error: Option<String>,
}

/// HTTP client for the browser-automation resolver service.
#[derive(Debug, Clone)]
pub struct DlProtectClient {
    http: reqwest::Client,
    service_url: String,
    use_remote_cache: bool,
    domains: RedirectorDomains,
}

impl DlProtectClient {
    pub fn new(config: DlProtectConfig) -> Result<Self, DlProtectError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DlProtectError::Client)?;

        Ok(Self {
            http,
            service_url: config.service_url.trim_end_matches('/').to_string(),
            use_remote_cache: !config.disable_remote_cache,
            domains: config.domains,
        })
    }

    async fn request_resolution(&self, link: &str) -> Result<String, DlProtectError> {
        let response = self
            .http
            .post(format!("{}{}", self.service_url, RESOLVE_PATH))
            .json(&ResolveRequest {
                url: link,
                use_cache: self.use_remote_cache,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DlProtectError::Status(response.status()));
        }

        let body: ResolveResponse = response.json().await?;
        match body.url.filter(|url| !url.is_empty()) {
            Some(url) if body.success => Ok(url),
            _ => Err(DlProtectError::Unresolved(
                body.error.unwrap_or_else(|| "no url returned".to_string()),
            )),
        }
    }

    async fn fetch_cache_stats(&self) -> Result<CacheStats, DlProtectError> {
        let response = self
            .http
            .get(format!("{}{}", self.service_url, CACHE_STATS_PATH))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DlProtectError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FallbackResolver for DlProtectClient {
    async fn resolve(&self, link: &str) -> String {
        if !self.domains.is_protected(link) {
            trace!(link = %link, "Not a protected link, skipping fallback resolver");
            return link.to_string();
        }

        debug!(link = %link, "Resolving protected link with fallback resolver");
        match self.request_resolution(link).await {
            Ok(resolved) => {
                info!(link = %link, resolved = %resolved, "Fallback resolver resolved link");
                resolved
            }
            Err(e) => {
                warn!(link = %link, adapter = "fallback", error = %e, "Fallback resolution failed");
                link.to_string()
            }
        }
    }

    async fn cache_stats(&self) -> Option<CacheStats> {
        match self.fetch_cache_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                debug!(error = %e, "Fallback resolver cache stats unavailable");
                None
            }
        }
    }

    async fn shutdown(&self) {
        debug!(service_url = %self.service_url, "Fallback resolver client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> DlProtectClient {
        let config = DlProtectConfig::builder()
            .service_url(server.uri())
            .timeout(Duration::from_millis(500))
            .build();
        DlProtectClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn resolves_protected_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESOLVE_PATH))
            .and(body_json(json!({"url": "https://dl-protect.link/abc?fn=x", "use_cache": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "url": "https://host2.com/file"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resolved = client(&server).resolve("https://dl-protect.link/abc?fn=x").await;
        assert_eq!(resolved, "https://host2.com/file");
    }

    #[tokio::test]
    async fn remote_cache_can_be_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESOLVE_PATH))
            .and(body_json(json!({"url": "https://dl-protect.link/abc", "use_cache": false})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "url": "https://host2.com/file"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = DlProtectConfig::builder()
            .service_url(server.uri())
            .disable_remote_cache(true)
            .build();
        let client = DlProtectClient::new(config).unwrap();
        assert_eq!(
            client.resolve("https://dl-protect.link/abc").await,
            "https://host2.com/file"
        );
    }

    #[tokio::test]
    async fn unprotected_link_skips_the_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resolved = client(&server).resolve("https://host2.com/file").await;
        assert_eq!(resolved, "https://host2.com/file");
    }

    #[tokio::test]
    async fn unsuccessful_resolution_returns_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESOLVE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "error": "captcha"})),
            )
            .mount(&server)
            .await;

        let link = "https://dl-protect.link/abc";
        assert_eq!(client(&server).resolve(link).await, link);
    }

    #[tokio::test]
    async fn http_error_returns_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESOLVE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let link = "https://dl-protect.link/abc";
        assert_eq!(client(&server).resolve(link).await, link);
    }

    #[tokio::test]
    async fn timeout_returns_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESOLVE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "url": "https://host2.com/file"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let link = "https://dl-protect.link/abc";
        assert_eq!(client(&server).resolve(link).await, link);
    }

    #[tokio::test]
    async fn cache_stats_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CACHE_STATS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"entries": 12, "directory": "/var/cache/dlprotect"})),
            )
            .mount(&server)
            .await;

        let stats = client(&server).cache_stats().await.unwrap();
        assert_eq!(
            stats,
            CacheStats {
                entries: 12,
                directory: "/var/cache/dlprotect".to_string()
            }
        );
    }

    #[tokio::test]
    async fn cache_stats_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CACHE_STATS_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client(&server).cache_stats().await.is_none());
    }
}
