use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::sessions::core::session::AggregateStat;
use crate::modules::sessions::use_cases::leaderboard::inbound::http::DEFAULT_LEADERBOARD_SIZE;
use crate::shell::state::AppState;

#[derive(SimpleObject)]
pub struct GqlLeaderboardRow {
    pub owner: String,
    pub display_name: String,
    pub total_minutes: u64,
    pub total_sessions: u64,
    pub updated_at: Option<i64>,
}

impl From<AggregateStat> for GqlLeaderboardRow {
    fn from(stat: AggregateStat) -> Self {
        Self {
            owner: stat.owner,
            display_name: stat.display_name,
            total_minutes: stat.total_minutes,
            total_sessions: stat.total_sessions,
            updated_at: stat.updated_at,
        }
    }
}

#[derive(Default)]
pub struct LeaderboardQuery;

#[Object]
impl LeaderboardQuery {
    async fn leaderboard(
        &self,
        context: &Context<'_>,
        limit: Option<i64>,
    ) -> GqlResult<Vec<GqlLeaderboardRow>> {
        let state = context.data_unchecked::<AppState>();
        let limit = limit.map_or(DEFAULT_LEADERBOARD_SIZE, |limit| limit.max(0) as usize);
        let rows = state.aggregate_stats.top_by_minutes(limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
