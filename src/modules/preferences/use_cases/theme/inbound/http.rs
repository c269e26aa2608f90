use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::preferences::core::theme::Theme;
use crate::shared::core::primitives::ClientId;
use crate::shared::infrastructure::local_store::ScopedStore;
use crate::shell::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

fn store_theme(state: &AppState, client: &ClientId, theme: Theme) -> axum::response::Response {
    match theme.save(&ScopedStore::new(state.local_store.as_ref(), client.as_str())) {
        Ok(()) => Json(ThemeBody { theme }).into_response(),
        Err(err) => {
            tracing::error!(client = client.as_str(), error = %err, "failed to save theme");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn load_theme(state: &AppState, client: &ClientId) -> Theme {
    Theme::load(&ScopedStore::new(state.local_store.as_ref(), client.as_str()))
}

pub async fn get_theme(State(state): State<AppState>, client: ClientId) -> impl IntoResponse {
    Json(ThemeBody {
        theme: load_theme(&state, &client),
    })
}

pub async fn put_theme(
    State(state): State<AppState>,
    client: ClientId,
    body: Result<Json<ThemeBody>, JsonRejection>,
) -> impl IntoResponse {
    match body {
        Ok(Json(body)) => store_theme(&state, &client, body.theme),
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    }
}

pub async fn toggle_theme(State(state): State<AppState>, client: ClientId) -> impl IntoResponse {
    let next = load_theme(&state, &client).toggled();
    store_theme(&state, &client, next)
}
