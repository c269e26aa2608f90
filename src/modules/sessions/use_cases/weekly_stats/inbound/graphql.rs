use async_graphql::{Context, Object, Result as GqlResult, SimpleObject, Subscription};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::modules::sessions::core::aggregate::{DayBucket, StudyStats};
use crate::modules::sessions::use_cases::weekly_stats::watcher::StatsWatcher;
use crate::shell::state::AppState;

#[derive(SimpleObject)]
pub struct GqlDayBucket {
    pub date: String,
    pub weekday: String,
    pub minutes: u64,
}

impl From<DayBucket> for GqlDayBucket {
    fn from(bucket: DayBucket) -> Self {
        Self {
            date: bucket.date,
            weekday: bucket.weekday,
            minutes: bucket.minutes,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlStudyStats {
    pub days: Vec<GqlDayBucket>,
    pub weekly_minutes: u64,
    pub today_minutes: u64,
    pub today_weekday: String,
    pub tasks_completed_this_week: u64,
    pub weekly_progress: f64,
    pub daily_progress: f64,
    pub weekly_goal: u32,
    pub daily_goal: u32,
    pub loaded_minutes: u64,
    pub loaded_sessions: u64,
    pub window_start: String,
    pub window_end: String,
}

impl From<StudyStats> for GqlStudyStats {
    fn from(stats: StudyStats) -> Self {
        Self {
            days: stats.days.into_iter().map(Into::into).collect(),
            weekly_minutes: stats.weekly_minutes,
            today_minutes: stats.today_minutes,
            today_weekday: stats.today_weekday,
            tasks_completed_this_week: stats.tasks_completed_this_week,
            weekly_progress: stats.weekly_progress,
            daily_progress: stats.daily_progress,
            weekly_goal: stats.weekly_goal,
            daily_goal: stats.daily_goal,
            loaded_minutes: stats.loaded_minutes,
            loaded_sessions: stats.loaded_sessions,
            window_start: stats.window_start,
            window_end: stats.window_end,
        }
    }
}

#[derive(Default)]
pub struct WeeklyStatsQuery;

#[Object]
impl WeeklyStatsQuery {
    async fn weekly_stats(&self, context: &Context<'_>, user_id: String) -> GqlResult<GqlStudyStats> {
        let state = context.data_unchecked::<AppState>();
        let stats = state
            .weekly_stats
            .compute(&user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(stats.into())
    }
}

#[derive(Default)]
pub struct WeeklyStatsSubscription;

#[Subscription]
impl WeeklyStatsSubscription {
    /// Fresh statistics every time the user's sessions, tasks or goals change.
    async fn weekly_stats(
        &self,
        context: &Context<'_>,
        user_id: String,
    ) -> impl Stream<Item = GqlStudyStats> {
        let state = context.data_unchecked::<AppState>();
        let watcher = StatsWatcher::spawn(state.weekly_stats.clone(), &state.feed, user_id);

        WatchStream::new(watcher.subscribe()).filter_map(move |stats| {
            let _watching = &watcher;
            stats.map(GqlStudyStats::from)
        })
    }
}
