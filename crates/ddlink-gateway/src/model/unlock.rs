use ddlink_core::Resolution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub links: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub results: Vec<UnlockResult>,
}

#[derive(Debug, Serialize)]
pub struct UnlockResult {
    pub link: String,
    /// One of `unlocked`, `resolved` or `passthrough`.
    pub resolution: &'static str,
}

impl From<Resolution> for UnlockResult {
    fn from(resolution: Resolution) -> Self {
        let kind = resolution.kind();
        Self {
            link: resolution.into_link(),
            resolution: kind,
        }
    }
}
