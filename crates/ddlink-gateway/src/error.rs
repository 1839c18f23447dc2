use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("links must not be empty")]
    EmptyBatch,
    #[error("too many links: got {got}, at most {max} allowed")]
    BatchTooLarge { got: usize, max: usize },
    #[error("links[{index}] is not a valid URL")]
    InvalidLink { index: usize },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyBatch
            | AppError::BatchTooLarge { .. }
            | AppError::InvalidLink { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
