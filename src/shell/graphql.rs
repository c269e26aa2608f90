use async_graphql::{MergedObject, MergedSubscription, Schema};

use crate::modules::rooms::use_cases::manage_rooms::inbound::graphql::{
    RoomsMutation, RoomsQuery, RoomsSubscription,
};
use crate::modules::sessions::use_cases::leaderboard::inbound::graphql::LeaderboardQuery;
use crate::modules::sessions::use_cases::log_focus_session::inbound::graphql::LogFocusSessionMutation;
use crate::modules::sessions::use_cases::weekly_stats::inbound::graphql::{
    WeeklyStatsQuery, WeeklyStatsSubscription,
};
use crate::modules::tasks::use_cases::manage_tasks::inbound::graphql::{TasksMutation, TasksQuery};
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(WeeklyStatsQuery, LeaderboardQuery, TasksQuery, RoomsQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(LogFocusSessionMutation, TasksMutation, RoomsMutation);

#[derive(MergedSubscription, Default)]
pub struct SubscriptionRoot(WeeklyStatsSubscription, RoomsSubscription);

pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot::default(),
    )
        .data(state)
        .finish()
}

#[cfg(test)]
mod graphql_schema_tests {
    use super::*;
    use crate::tests::fixtures::state::make_test_state;
    use std::time::Duration;
    use tokio_stream::{Stream, StreamExt};

    async fn next_data<S>(stream: &mut S) -> serde_json::Value
    where
        S: Stream<Item = async_graphql::Response> + Unpin,
    {
        let response = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("no subscription event within 5s")
            .expect("subscription ended");
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn it_should_log_a_session_and_show_it_in_the_weekly_stats() {
        let schema = build_schema(make_test_state());

        let logged = schema
            .execute(
                r#"mutation { logFocusSession(userId: "user-fixed-0001", minutes: 25) { minutes } }"#,
            )
            .await;
        assert!(logged.errors.is_empty(), "{:?}", logged.errors);

        let stats = schema
            .execute(r#"{ weeklyStats(userId: "user-fixed-0001") { weeklyMinutes todayMinutes } }"#)
            .await;
        assert!(stats.errors.is_empty(), "{:?}", stats.errors);
        let data = stats.data.into_json().unwrap();
        assert_eq!(data["weeklyStats"]["weeklyMinutes"], 25);
        assert_eq!(data["weeklyStats"]["todayMinutes"], 25);
    }

    #[tokio::test]
    async fn it_should_run_a_room_timer() {
        let schema = build_schema(make_test_state());

        let created = schema
            .execute(r#"mutation { createRoom(name: "Exam prep") { code name } }"#)
            .await;
        assert!(created.errors.is_empty(), "{:?}", created.errors);
        let code = created.data.into_json().unwrap()["createRoom"]["code"]
            .as_str()
            .unwrap()
            .to_string();

        let started = schema
            .execute(format!(
                r#"mutation {{ roomTimer(userId: "ada", code: "{code}", action: START) {{ running secondsLeft mode }} }}"#
            ))
            .await;
        assert!(started.errors.is_empty(), "{:?}", started.errors);
        let data = started.data.into_json().unwrap();
        assert_eq!(data["roomTimer"]["running"], true);
        assert_eq!(data["roomTimer"]["secondsLeft"], 25 * 60);
        assert_eq!(data["roomTimer"]["mode"], "work");
    }

    #[tokio::test]
    async fn it_should_report_unknown_rooms_as_errors() {
        let schema = build_schema(make_test_state());
        let response = schema
            .execute(r#"{ room(code: "room-missing") { room { name } } }"#)
            .await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("not found"));
    }

    #[tokio::test]
    async fn it_should_stream_weekly_stats_as_sessions_are_logged() {
        let schema = build_schema(make_test_state());
        let mut stats = Box::pin(schema.execute_stream(
            r#"subscription { weeklyStats(userId: "user-fixed-0001") { todayMinutes } }"#,
        ));

        let initial = next_data(&mut stats).await;
        assert_eq!(initial["weeklyStats"]["todayMinutes"], 0);

        let logged = schema
            .execute(
                r#"mutation { logFocusSession(userId: "user-fixed-0001", minutes: 25) { minutes } }"#,
            )
            .await;
        assert!(logged.errors.is_empty(), "{:?}", logged.errors);

        let updated = next_data(&mut stats).await;
        assert_eq!(updated["weeklyStats"]["todayMinutes"], 25);
    }

    #[tokio::test]
    async fn it_should_stream_the_room_timer_to_a_seated_user() {
        let state = make_test_state();
        let schema = build_schema(state.clone());
        let room = state.rooms.create_room(Some("Exam prep".into())).await.unwrap();

        let mut timer = Box::pin(schema.execute_stream(format!(
            r#"subscription {{ roomTimer(userId: "ada", displayName: "Ada", code: "{}") {{ running secondsLeft mode }} }}"#,
            room.code
        )));
        let idle = next_data(&mut timer).await;
        assert_eq!(idle["roomTimer"]["running"], false);
        assert_eq!(idle["roomTimer"]["secondsLeft"], 25 * 60);

        let view = state.rooms.open_room(&room.code).await.unwrap();
        assert_eq!(view.participants[0].display_name, "Ada");
        assert_eq!(view.active.len(), 1);

        let started = schema
            .execute(format!(
                r#"mutation {{ roomTimer(userId: "bob", code: "{}", action: START) {{ running }} }}"#,
                room.code
            ))
            .await;
        assert!(started.errors.is_empty(), "{:?}", started.errors);

        let running = next_data(&mut timer).await;
        assert_eq!(running["roomTimer"]["running"], true);
        assert_eq!(running["roomTimer"]["mode"], "work");
    }

    #[tokio::test]
    async fn it_should_refuse_to_stream_unknown_rooms() {
        let schema = build_schema(make_test_state());
        let mut timer = Box::pin(schema.execute_stream(
            r#"subscription { roomTimer(userId: "ada", code: "room-missing") { running } }"#,
        ));

        let response = tokio::time::timeout(Duration::from_secs(5), timer.next())
            .await
            .expect("no response within 5s")
            .expect("subscription ended");
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("not found"));
    }
}
