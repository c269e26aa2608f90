use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::timer::core::settings::TimerSettings;
use crate::modules::timer::use_cases::run_personal_timer::registry::TimerSnapshot;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct UpdateTimerSettingsBody {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

#[derive(Serialize)]
pub struct UpdateTimerSettingsResponse {
    pub settings: TimerSettings,
    /// The open personal timer after the change, if any.
    pub timer: Option<TimerSnapshot>,
}

pub async fn get_settings(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    Json(state.timer_settings.load(&user.id).await)
}

pub async fn put_settings(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<UpdateTimerSettingsBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .timer_settings
        .update(&user.id, body.work_minutes, body.break_minutes)
        .await
    {
        Ok(settings) => {
            let timer = state
                .personal_timers
                .apply_settings(&user.id, settings)
                .await;
            Json(UpdateTimerSettingsResponse { settings, timer }).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}
