use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, info_handler, unlock_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/info", get(info_handler))
            .nest("/v1", Router::new().route("/unlock", post(unlock_handler)))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
