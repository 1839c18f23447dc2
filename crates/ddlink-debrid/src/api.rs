//! Wire types of the AllDebrid v4 API.

use crate::error::DebridError;
use ddlink_core::UnlockedLink;
use serde::Deserialize;

pub const UNLOCK_PATH: &str = "/link/unlock";
pub const REDIRECTOR_PATH: &str = "/link/redirector";
pub const USER_PATH: &str = "/user";

/// Error codes meaning the host is temporarily unusable.
pub const HOST_UNAVAILABLE_CODES: &[&str] = &[
    "LINK_HOST_NOT_SUPPORTED",
    "LINK_HOST_UNAVAILABLE",
    "LINK_HOST_FULL",
    "LINK_HOST_LIMIT_REACHED",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// The envelope every endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Converts the envelope into its payload or a typed error.
    pub fn into_result(self) -> Result<T, DebridError> {
        if let Some(error) = self.error {
            return Err(DebridError::Api {
                code: error.code,
                message: error.message,
            });
        }
        match (self.status, self.data) {
            (ApiStatus::Success, Some(data)) => Ok(data),
            (ApiStatus::Success, None) => {
                Err(DebridError::Decode("success response without data".into()))
            }
            (ApiStatus::Error, _) => {
                Err(DebridError::Decode("error response without error body".into()))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnlockData {
    #[serde(default)]
    pub link: Option<String>,
    pub filename: Option<String>,
    pub host: Option<String>,
    pub filesize: Option<u64>,
}

impl UnlockData {
    /// Returns the unlocked link, or `None` if the payload carries no link.
    pub fn into_unlocked(self) -> Option<UnlockedLink> {
        let link = self.link.filter(|link| !link.is_empty())?;
        Some(UnlockedLink {
            link,
            filename: self.filename,
            host: self.host,
            filesize: self.filesize,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedirectorData {
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_unlock_success() {
        let body = r#"{"status":"success","data":{"link":"https://cdn.host2.com/real","filename":"a.mkv","host":"host2","filesize":42}}"#;
        let response: ApiResponse<UnlockData> = serde_json::from_str(body).unwrap();
        let unlocked = response.into_result().unwrap().into_unlocked().unwrap();
        assert_eq!(unlocked.link, "https://cdn.host2.com/real");
        assert_eq!(unlocked.filename.as_deref(), Some("a.mkv"));
        assert_eq!(unlocked.filesize, Some(42));
    }

    #[test]
    fn decode_error_envelope() {
        let body = r#"{"status":"error","error":{"code":"LINK_HOST_FULL","message":"full"}}"#;
        let response: ApiResponse<UnlockData> = serde_json::from_str(body).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code(), Some("LINK_HOST_FULL"));
    }

    #[test]
    fn success_without_data_is_a_decode_error() {
        let body = r#"{"status":"success"}"#;
        let response: ApiResponse<UnlockData> = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_result(),
            Err(DebridError::Decode(_))
        ));
    }

    #[test]
    fn empty_link_is_not_unlocked() {
        let data = UnlockData {
            link: Some(String::new()),
            filename: None,
            host: None,
            filesize: None,
        };
        assert!(data.into_unlocked().is_none());
    }
}
