use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::modules::preferences::use_cases::theme::inbound::http as theme_http;
use crate::modules::rooms::use_cases::manage_rooms::inbound::http as rooms_http;
use crate::modules::sessions::use_cases::goals::inbound::http as goals_http;
use crate::modules::sessions::use_cases::leaderboard::inbound::http as leaderboard_http;
use crate::modules::sessions::use_cases::log_focus_session::inbound::http as log_session_http;
use crate::modules::sessions::use_cases::weekly_stats::inbound::http as weekly_stats_http;
use crate::modules::tasks::use_cases::guest_tasks::inbound::http as guest_tasks_http;
use crate::modules::tasks::use_cases::manage_tasks::inbound::http as tasks_http;
use crate::modules::timer::use_cases::run_personal_timer::inbound::http as timer_http;
use crate::modules::timer::use_cases::timer_settings::inbound::http as timer_settings_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // personal timer
        .route("/timer", get(timer_http::snapshot).delete(timer_http::close))
        .route("/timer/open", post(timer_http::open))
        .route("/timer/start", post(timer_http::start))
        .route("/timer/pause", post(timer_http::pause))
        .route("/timer/reset", post(timer_http::reset))
        .route(
            "/timer/settings",
            get(timer_settings_http::get_settings).put(timer_settings_http::put_settings),
        )
        // sessions and statistics
        .route("/sessions", post(log_session_http::handle))
        .route("/stats/weekly", get(weekly_stats_http::handle))
        .route("/leaderboard", get(leaderboard_http::handle))
        .route("/goals", get(goals_http::get_goals).put(goals_http::put_goals))
        // tasks
        .route("/tasks", get(tasks_http::list).post(tasks_http::create))
        .route("/tasks/{id}/toggle", post(tasks_http::toggle))
        .route("/tasks/{id}", axum::routing::delete(tasks_http::delete))
        .route(
            "/guest/tasks",
            get(guest_tasks_http::list).post(guest_tasks_http::add),
        )
        .route("/guest/tasks/{id}/toggle", post(guest_tasks_http::toggle))
        .route(
            "/guest/tasks/{id}",
            axum::routing::delete(guest_tasks_http::delete),
        )
        // rooms
        .route("/rooms", post(rooms_http::create_room))
        .route("/rooms/{code}", get(rooms_http::open_room))
        .route("/rooms/{code}/join", post(rooms_http::join))
        .route(
            "/rooms/{code}/messages",
            get(rooms_http::list_messages).post(rooms_http::send_message),
        )
        .route(
            "/rooms/{code}/presence",
            get(rooms_http::active_presence).post(rooms_http::heartbeat),
        )
        .route("/rooms/{code}/timer", get(rooms_http::get_timer))
        .route("/rooms/{code}/timer/{action}", post(rooms_http::timer_action))
        // preferences
        .route(
            "/preferences/theme",
            get(theme_http::get_theme).put(theme_http::put_theme),
        )
        .route("/preferences/theme/toggle", post(theme_http::toggle_theme))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
