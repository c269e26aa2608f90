use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    match state.weekly_stats.compute(&user.id).await {
        Ok(stats) => Json(stats).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
