use ddlink_core::CacheStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub debrid_enabled: bool,
    /// `None` when the debrid service is not configured.
    pub debrid_premium: Option<bool>,
    pub unavailable_hosts: Vec<String>,
    pub dlprotect_cache: Option<CacheStats>,
}
