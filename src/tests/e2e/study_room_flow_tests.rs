use crate::modules::rooms::use_cases::manage_rooms::session::{RoomSession, RoomTimings};
use crate::modules::timer::core::settings::TimerMode;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::http::router;
use crate::tests::fixtures::state::make_test_state;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

const NEVER: Duration = Duration::from_secs(3600);

fn quiet() -> RoomTimings {
    RoomTimings {
        heartbeat_every: NEVER,
        tick_every: NEVER,
    }
}

async fn json_of(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn shares_one_timer_between_everyone_in_a_room() {
    let state = make_test_state();
    let app = router(state.clone());

    let created = app
        .clone()
        .oneshot(
            Request::post("/rooms")
                .header("x-user-id", "ada")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Finals week"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let code = json_of(created).await["code"].as_str().unwrap().to_string();

    let ada = RoomSession::attach(
        state.rooms.clone(),
        &code,
        CurrentUser::new("ada", Some("Ada".into())),
        quiet(),
    )
    .await
    .unwrap();
    let bob = RoomSession::attach(
        state.rooms.clone(),
        &code,
        CurrentUser::new("bob", Some("Bob".into())),
        quiet(),
    )
    .await
    .unwrap();

    // Both start at once; whichever write lands last is what everyone sees.
    let (_, _) = tokio::join!(ada.start(), bob.reset());
    let stored = state.rooms.timer(&code).await.unwrap().unwrap();

    let (ada_ref, bob_ref) = (&ada, &bob);
    tokio::time::timeout(Duration::from_secs(5), async move {
        loop {
            let (a, b) = (ada_ref.view().await, bob_ref.view().await);
            if (a.mode, a.seconds_left, a.running) == (stored.mode, stored.seconds_left, stored.running)
                && (b.mode, b.seconds_left, b.running)
                    == (stored.mode, stored.seconds_left, stored.running)
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("participants did not converge on the stored timer");
    assert_eq!(stored.mode, TimerMode::Work);

    bob.send_message("starting now").await.unwrap();

    let opened = json_of(
        app.clone()
            .oneshot(
                Request::get(format!("/rooms/{code}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(opened["room"]["name"], "Finals week");
    assert_eq!(opened["participants"].as_array().unwrap().len(), 2);
    assert_eq!(opened["active"].as_array().unwrap().len(), 2);
    assert_eq!(opened["messages"][0]["display_name"], "Bob");
    assert_eq!(opened["messages"][0]["text"], "starting now");

    drop(ada);
    drop(bob);
}
