use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::state::AppState;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    match state
        .aggregate_stats
        .top_by_minutes(params.limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE))
        .await
    {
        Ok(rows) => Json(rows).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
