use thiserror::Error;

/// Result type for collaborator calls made by the orchestrator.
pub type Result<T> = std::result::Result<T, UnlockError>;

/// Failures a collaborator may surface to the orchestrator.
///
/// The concrete HTTP clients absorb these into "no result" themselves; the
/// variants exist so that any adapter which does fail is still contained by
/// the orchestrator.
#[derive(Debug, Clone, Error)]
pub enum UnlockError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("adapter failure: {0}")]
    Other(String),
}
