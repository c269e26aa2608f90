use crate::modules::sessions::adapters::outbound::session_log::SessionLog;
use crate::modules::sessions::core::aggregate::{StudyStats, compute_study_stats};
use crate::modules::sessions::core::goals::Goals;
use crate::modules::tasks::adapters::outbound::task_repository::TaskRepository;
use crate::shared::core::primitives::Clock;
use crate::shared::infrastructure::local_store::{LocalStore, ScopedStore};
use chrono::{DateTime, Local, TimeZone};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("session log read failed: {0}")]
    SessionLog(String),

    #[error("task read failed: {0}")]
    Tasks(String),
}

/// Reads the inputs of the aggregator and runs it. Holds no cached result.
pub struct WeeklyStatsHandler {
    sessions: Arc<dyn SessionLog>,
    tasks: Arc<dyn TaskRepository>,
    local_store: Arc<dyn LocalStore>,
    clock: Arc<dyn Clock>,
    history_limit: usize,
}

impl WeeklyStatsHandler {
    pub fn new(
        sessions: Arc<dyn SessionLog>,
        tasks: Arc<dyn TaskRepository>,
        local_store: Arc<dyn LocalStore>,
        clock: Arc<dyn Clock>,
        history_limit: usize,
    ) -> Self {
        Self {
            sessions,
            tasks,
            local_store,
            clock,
            history_limit,
        }
    }

    /// Statistics for the server's local calendar at the clock's current time.
    pub async fn compute(&self, owner: &str) -> Result<StudyStats, ApplicationError> {
        let now = Local
            .timestamp_millis_opt(self.clock.now_millis())
            .single()
            .unwrap_or_else(Local::now);
        self.compute_at(owner, &now).await
    }

    pub async fn compute_at<Tz: TimeZone>(
        &self,
        owner: &str,
        now: &DateTime<Tz>,
    ) -> Result<StudyStats, ApplicationError> {
        let sessions = self
            .sessions
            .recent_by_owner(owner, self.history_limit)
            .await
            .map_err(|err| ApplicationError::SessionLog(err.to_string()))?;
        let tasks = self
            .tasks
            .list_by_owner(owner)
            .await
            .map_err(|err| ApplicationError::Tasks(err.to_string()))?;
        let goals = Goals::load(&ScopedStore::new(self.local_store.as_ref(), owner));

        Ok(compute_study_stats(&sessions, &tasks, goals, now))
    }
}

#[cfg(test)]
mod weekly_stats_handler_tests {
    use super::*;
    use crate::modules::sessions::adapters::outbound::session_log_in_memory::InMemorySessionStore;
    use crate::modules::tasks::adapters::outbound::task_repository_in_memory::InMemoryTaskRepository;
    use crate::shared::core::primitives::FixedClock;
    use crate::shared::infrastructure::local_store::in_memory::InMemoryLocalStore;
    use crate::tests::fixtures::sessions::session_at;
    use crate::tests::fixtures::tasks::TaskBuilder;
    use chrono::Utc;
    use rstest::rstest;

    const DAY: i64 = 24 * 60 * 60 * 1000;

    #[rstest]
    #[tokio::test]
    async fn it_should_aggregate_only_the_history_limit() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let at = now.timestamp_millis();
        let sessions = Arc::new(InMemorySessionStore::new());
        sessions.append(session_at("u-1", 10, Some(at - 2 * DAY))).await.unwrap();
        sessions.append(session_at("u-1", 20, Some(at - DAY))).await.unwrap();
        sessions.append(session_at("u-1", 30, Some(at))).await.unwrap();
        sessions.append(session_at("u-2", 99, Some(at))).await.unwrap();
        let tasks = Arc::new(InMemoryTaskRepository::new());
        tasks
            .insert(TaskBuilder::new("t-1").owner("u-1").done_at(at).build())
            .await
            .unwrap();
        let handler = WeeklyStatsHandler::new(
            sessions,
            tasks,
            Arc::new(InMemoryLocalStore::new()),
            Arc::new(FixedClock::at(at)),
            2,
        );

        let stats = handler.compute_at("u-1", &now).await.unwrap();

        assert_eq!(stats.loaded_sessions, 2);
        assert_eq!(stats.weekly_minutes, 50);
        assert_eq!(stats.today_minutes, 30);
        assert_eq!(stats.tasks_completed_this_week, 1);
        assert_eq!(stats.daily_goal, 60);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_the_owners_goals_from_the_local_store() {
        let store = Arc::new(InMemoryLocalStore::new());
        Goals {
            daily_minutes: 10,
            weekly_minutes: 20,
        }
        .save(&ScopedStore::new(store.as_ref(), "u-1"))
        .unwrap();
        let handler = WeeklyStatsHandler::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryTaskRepository::new()),
            store,
            Arc::new(FixedClock::at(0)),
            200,
        );

        let stats = handler.compute("u-1").await.unwrap();

        assert_eq!(stats.daily_goal, 10);
        assert_eq!(stats.weekly_goal, 20);
        assert_eq!(stats.weekly_minutes, 0);
        let other = handler.compute("u-2").await.unwrap();
        assert_eq!(other.daily_goal, Goals::default().daily_minutes);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_session_log_is_offline() {
        let mut sessions = InMemorySessionStore::new();
        sessions.toggle_offline();
        let handler = WeeklyStatsHandler::new(
            Arc::new(sessions),
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryLocalStore::new()),
            Arc::new(FixedClock::at(0)),
            200,
        );

        assert!(matches!(
            handler.compute("u-1").await,
            Err(ApplicationError::SessionLog(_))
        ));
    }
}
