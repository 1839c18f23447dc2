use crate::api::HOST_UNAVAILABLE_CODES;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebridError {
    #[error("debrid service is not configured")]
    Unconfigured,
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl DebridError {
    /// Returns the API error code, if this is an API error.
    pub fn code(&self) -> Option<&str> {
        match self {
            DebridError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the error says the hosting site itself is unusable right now,
    /// as opposed to a problem with this particular link or session.
    pub fn is_host_unavailable(&self) -> bool {
        self.code()
            .is_some_and(|code| HOST_UNAVAILABLE_CODES.contains(&code))
    }
}
