use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::rooms::core::shared_timer::{RoomTimerAction, RoomTimerState};
use crate::modules::rooms::use_cases::manage_rooms::handler::RoomError;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct CreateRoomBody {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct SendMessageBody {
    pub text: String,
}

#[derive(Serialize)]
pub struct RoomTimerResponse {
    pub timer: Option<RoomTimerState>,
}

fn error_response(err: RoomError) -> axum::response::Response {
    match err {
        RoomError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        RoomError::Domain(reason) => (StatusCode::BAD_REQUEST, reason.to_string()).into_response(),
        RoomError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

pub async fn create_room(
    State(state): State<AppState>,
    _user: CurrentUser,
    body: Option<Json<CreateRoomBody>>,
) -> impl IntoResponse {
    let Json(body) = body.unwrap_or_default();

    match state.rooms.create_room(body.name).await {
        Ok(room) => (StatusCode::CREATED, Json(room)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn open_room(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.open_room(&code).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn join(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.join(&code, &user).await {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.messages(&code).await {
        Ok(messages) => Json(messages).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn send_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
    body: Result<Json<SendMessageBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.rooms.send_message(&code, &user, &body.text).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn heartbeat(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.heartbeat(&code, &user).await {
        Ok(record) => Json(record).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn active_presence(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.active_presence(&code).await {
        Ok(records) => Json(records).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_timer(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match state.rooms.timer(&code).await {
        Ok(timer) => Json(RoomTimerResponse { timer }).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn timer_action(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((code, action)): Path<(String, RoomTimerAction)>,
) -> impl IntoResponse {
    match state.rooms.timer_action(&code, &user, action).await {
        Ok(timer) => Json(RoomTimerResponse { timer: Some(timer) }).into_response(),
        Err(err) => error_response(err),
    }
}
