use thiserror::Error;

#[derive(Debug, Error)]
pub enum DlProtectError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("service could not resolve link: {0}")]
    Unresolved(String),
}
