use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::tasks::core::task::{TaskCounts, TaskRecord, count};
use crate::modules::tasks::use_cases::manage_tasks::handler::ApplicationError;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateTaskBody {
    pub text: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskRecord>,
    #[serde(flatten)]
    pub counts: TaskCounts,
}

fn error_response(err: ApplicationError) -> axum::response::Response {
    match err {
        ApplicationError::Domain(reason) => {
            (StatusCode::BAD_REQUEST, reason.to_string()).into_response()
        }
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        ApplicationError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    match state.tasks.list(&user.id).await {
        Ok(tasks) => {
            let counts = count(&tasks);
            Json(TaskListResponse { tasks, counts }).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .tasks
        .create(&user, body.text, body.start_time, body.end_time)
        .await
    {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn toggle(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    match state.tasks.toggle(&user, &task_id).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    match state.tasks.delete(&user, &task_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
