use axum::extract::State;
use axum::Json;
use tracing::debug;
use url::Url;

use crate::error::{AppError, Result};
use crate::model::{UnlockRequest, UnlockResponse, UnlockResult};
use crate::state::AppState;

/// Upper bound on links per request.
pub const MAX_BATCH_SIZE: usize = 200;

pub async fn unlock_handler(
    State(state): State<AppState>,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>> {
    if request.links.is_empty() {
        return Err(AppError::EmptyBatch);
    }
    if request.links.len() > MAX_BATCH_SIZE {
        return Err(AppError::BatchTooLarge {
            got: request.links.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    if let Some(index) = request
        .links
        .iter()
        .position(|link| link.trim().is_empty() || Url::parse(link).is_err())
    {
        return Err(AppError::InvalidLink { index });
    }

    debug!(count = request.links.len(), "Unlocking batch");
    let results = state.service.unlock_links(&request.links).await;

    Ok(Json(UnlockResponse {
        results: results.into_iter().map(UnlockResult::from).collect(),
    }))
}
