use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::sessions::use_cases::log_focus_session::handler::ApplicationError;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct LogFocusSessionBody {
    pub minutes: u32,
}

pub async fn handle(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<LogFocusSessionBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.log_session.handle(&user, body.minutes).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(ApplicationError::Domain(reason)) => {
            (StatusCode::BAD_REQUEST, reason).into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
