mod info;
mod unlock;

pub use info::{HealthResponse, InfoResponse};
pub use unlock::{UnlockRequest, UnlockResponse, UnlockResult};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
