use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::sessions::core::goals::Goals;
use crate::shared::core::primitives::CurrentUser;
use crate::shared::infrastructure::change_feed::Change;
use crate::shared::infrastructure::local_store::ScopedStore;
use crate::shell::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct GoalsBody {
    pub daily_minutes: u32,
    pub weekly_minutes: u32,
}

impl From<Goals> for GoalsBody {
    fn from(goals: Goals) -> Self {
        Self {
            daily_minutes: goals.daily_minutes,
            weekly_minutes: goals.weekly_minutes,
        }
    }
}

pub async fn get_goals(State(state): State<AppState>, user: CurrentUser) -> impl IntoResponse {
    let store = ScopedStore::new(state.local_store.as_ref(), &user.id);
    Json(GoalsBody::from(Goals::load(&store)))
}

pub async fn put_goals(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<GoalsBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let goals = Goals {
        daily_minutes: body.daily_minutes,
        weekly_minutes: body.weekly_minutes,
    };
    let saved = goals.save(&ScopedStore::new(state.local_store.as_ref(), &user.id));
    match saved {
        Ok(()) => {
            state.feed.publish(Change::Goals { owner: user.id });
            Json(GoalsBody::from(goals)).into_response()
        }
        Err(err) => {
            tracing::error!(owner = %user.id, error = %err, "failed to save goals");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
