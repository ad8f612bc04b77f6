use crate::transport::http::types::{AppState, BuildTargetsResponse};
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/build/targets",
    responses(
        (status = 200, description = "Slugs pre-rendered at startup", body = BuildTargetsResponse)
    )
)]
pub async fn build_targets_handler(State(state): State<AppState>) -> Json<BuildTargetsResponse> {
    Json(BuildTargetsResponse::from_targets(state.static_pages.targets()))
}
