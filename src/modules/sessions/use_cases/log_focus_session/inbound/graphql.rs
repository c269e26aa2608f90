use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::sessions::core::session::SessionRecord;
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(SimpleObject)]
pub struct GqlSessionRecord {
    pub session_id: String,
    pub owner: String,
    pub minutes: u32,
    pub created_at: Option<i64>,
}

impl From<SessionRecord> for GqlSessionRecord {
    fn from(record: SessionRecord) -> Self {
        Self {
            session_id: record.session_id,
            owner: record.owner,
            minutes: record.minutes,
            created_at: record.created_at,
        }
    }
}

#[derive(Default)]
pub struct LogFocusSessionMutation;

#[Object]
impl LogFocusSessionMutation {
    async fn log_focus_session(
        &self,
        context: &Context<'_>,
        user_id: String,
        display_name: Option<String>,
        minutes: u32,
    ) -> GqlResult<GqlSessionRecord> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, display_name);

        let record = state
            .log_session
            .handle(&user, minutes)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(record.into())
    }
}
