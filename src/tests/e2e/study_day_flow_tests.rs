use crate::modules::sessions::use_cases::weekly_stats::watcher::StatsWatcher;
use crate::shell::http::router;
use crate::tests::fixtures::state::make_test_state;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

const OWNER: &str = "user-fixed-0001";

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", OWNER)
        .header("x-user-name", "Ada")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", OWNER)
        .body(Body::empty())
        .unwrap()
}

async fn json_of(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn tracks_a_study_day_from_sessions_tasks_and_goals() {
    let state = make_test_state();
    let app = router(state.clone());
    let watcher = StatsWatcher::spawn(state.weekly_stats.clone(), &state.feed, OWNER.into());
    let mut live = watcher.subscribe();

    let goals = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/goals",
            r#"{"daily_minutes":50,"weekly_minutes":100}"#,
        ))
        .await
        .unwrap();
    assert_eq!(goals.status(), StatusCode::OK);

    for minutes in [25, 30] {
        let logged = app
            .clone()
            .oneshot(json_request("POST", "/sessions", &format!(r#"{{"minutes":{minutes}}}"#)))
            .await
            .unwrap();
        assert_eq!(logged.status(), StatusCode::CREATED);
    }

    let task = app
        .clone()
        .oneshot(json_request("POST", "/tasks", r#"{"text":"Revise chapter 4"}"#))
        .await
        .unwrap();
    let task_id = json_of(task).await["task_id"].as_str().unwrap().to_string();
    let done = app
        .clone()
        .oneshot(empty_request("POST", &format!("/tasks/{task_id}/toggle")))
        .await
        .unwrap();
    assert_eq!(done.status(), StatusCode::OK);

    let stats = json_of(
        app.clone()
            .oneshot(empty_request("GET", "/stats/weekly"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(stats["weekly_minutes"], 55);
    assert_eq!(stats["today_minutes"], 55);
    assert_eq!(stats["tasks_completed_this_week"], 1);
    assert_eq!(stats["weekly_progress"], 55.0);
    assert_eq!(stats["daily_progress"], 100.0);
    assert_eq!(stats["days"].as_array().unwrap().len(), 7);

    // The watcher converges on the same numbers without being asked.
    let watched = tokio::time::timeout(
        Duration::from_secs(5),
        live.wait_for(|stats| {
            stats
                .as_ref()
                .is_some_and(|stats| stats.weekly_minutes == 55 && stats.tasks_completed_this_week == 1)
        }),
    )
    .await
    .expect("watcher did not catch up within 5s")
    .unwrap()
    .clone();
    assert_eq!(watched.map(|stats| stats.daily_goal), Some(50));

    let leaderboard = json_of(
        app.clone()
            .oneshot(empty_request("GET", "/leaderboard?limit=5"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(leaderboard[0]["owner"], OWNER);
    assert_eq!(leaderboard[0]["display_name"], "Ada");
    assert_eq!(leaderboard[0]["total_minutes"], 55);
    assert_eq!(leaderboard[0]["total_sessions"], 2);
}

#[tokio::test]
async fn records_a_session_when_a_personal_timer_completes() {
    let state = make_test_state();
    let app = router(state.clone());

    let settings = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/timer/settings",
            r#"{"work_minutes":1,"break_minutes":1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(settings.status(), StatusCode::OK);

    app.clone()
        .oneshot(empty_request("POST", "/timer/open"))
        .await
        .unwrap();
    let started = app
        .clone()
        .oneshot(empty_request("POST", "/timer/start"))
        .await
        .unwrap();
    assert_eq!(json_of(started).await["running"], true);

    for _ in 0..61 {
        state.personal_timers.tick(OWNER).await;
    }

    let timer = json_of(
        app.clone()
            .oneshot(empty_request("GET", "/timer"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(timer["mode"], "break");
    assert_eq!(timer["seconds_left"], 60);

    let stats = json_of(
        app.clone()
            .oneshot(empty_request("GET", "/stats/weekly"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(stats["today_minutes"], 1);
    assert_eq!(stats["loaded_sessions"], 1);
}
