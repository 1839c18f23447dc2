use axum::extract::State;
use axum::Json;

use crate::model::InfoResponse;
use crate::state::AppState;

pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    let debrid_enabled = state.debrid.is_configured();
    let debrid_premium = async {
        if debrid_enabled {
            Some(state.debrid.is_premium().await)
        } else {
            None
        }
    };
    let (debrid_premium, dlprotect_cache) =
        tokio::join!(debrid_premium, state.service.fallback().cache_stats());

    Json(InfoResponse {
        name: "ddlink",
        version: env!("CARGO_PKG_VERSION"),
        debrid_enabled,
        debrid_premium,
        unavailable_hosts: state
            .hosts
            .unavailable_hosts()
            .into_iter()
            .map(|host| host.to_string())
            .collect(),
        dlprotect_cache,
    })
}
