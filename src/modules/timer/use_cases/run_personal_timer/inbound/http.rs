use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::modules::timer::use_cases::run_personal_timer::registry::{TimerRunError, TimerSnapshot};
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

fn respond(result: Result<TimerSnapshot, TimerRunError>) -> axum::response::Response {
    match result {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(TimerRunError::NotOpen) => StatusCode::NOT_FOUND.into_response(),
        Err(TimerRunError::SettingsLoading) => StatusCode::CONFLICT.into_response(),
    }
}

pub async fn open(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    Json(state.personal_timers.open(&user).await)
}

pub async fn start(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    respond(state.personal_timers.start(&user.id).await)
}

pub async fn pause(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    respond(state.personal_timers.pause(&user.id).await)
}

pub async fn reset(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    respond(state.personal_timers.reset(&user.id).await)
}

pub async fn snapshot(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    respond(
        state
            .personal_timers
            .snapshot(&user.id)
            .await
            .ok_or(TimerRunError::NotOpen),
    )
}

pub async fn close(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    if state.personal_timers.close(&user.id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
