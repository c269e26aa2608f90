use crate::modules::sessions::adapters::outbound::session_log::{
    AggregateStatsRepository, SessionLog,
};
use crate::modules::sessions::core::session::SessionRecord;
use crate::modules::sessions::use_cases::log_focus_session::decide::{
    LogFocusSession, decide_log_session,
};
use crate::modules::sessions::use_cases::log_focus_session::decision::Decision;
use crate::modules::timer::adapters::outbound::session_recorder::SessionRecorder;
use crate::shared::core::primitives::{Clock, CurrentUser};
use crate::shared::infrastructure::change_feed::{Change, ChangeFeed};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain rejected: {0}")]
    Domain(String),

    #[error("session log write failed: {0}")]
    SessionLog(String),

    /// The session itself was stored; only the running totals are stale.
    #[error("aggregate stats write failed: {0}")]
    Aggregate(String),
}

pub struct LogFocusSessionHandler<TSessionLog, TStats>
where
    TSessionLog: SessionLog + 'static,
    TStats: AggregateStatsRepository + 'static,
{
    session_log: Arc<TSessionLog>,
    stats: Arc<TStats>,
    clock: Arc<dyn Clock>,
    feed: ChangeFeed,
}

impl<TSessionLog, TStats> LogFocusSessionHandler<TSessionLog, TStats>
where
    TSessionLog: SessionLog + 'static,
    TStats: AggregateStatsRepository + 'static,
{
    pub fn new(
        session_log: Arc<TSessionLog>,
        stats: Arc<TStats>,
        clock: Arc<dyn Clock>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            session_log,
            stats,
            clock,
            feed,
        }
    }

    /// Appends the session, then bumps the owner's totals. The two writes are
    /// independent; there is no rollback and no retry.
    pub async fn handle(
        &self,
        user: &CurrentUser,
        minutes: u32,
    ) -> Result<SessionRecord, ApplicationError> {
        let completed_at = self.clock.now_millis();
        let command = LogFocusSession {
            session_id: Uuid::now_v7().to_string(),
            owner: user.id.clone(),
            minutes,
            completed_at,
        };

        let record = match decide_log_session(command) {
            Decision::Accepted { record } => record,
            Decision::Rejected { reason } => {
                return Err(ApplicationError::Domain(reason.to_string()));
            }
        };

        self.session_log
            .append(record.clone())
            .await
            .map_err(|err| ApplicationError::SessionLog(err.to_string()))?;
        self.feed.publish(Change::Sessions {
            owner: user.id.clone(),
        });

        self.stats
            .increment(&user.id, &user.display_name, minutes, completed_at)
            .await
            .map_err(|err| {
                tracing::error!(owner = %user.id, error = %err, "session logged but aggregate stats not updated");
                ApplicationError::Aggregate(err.to_string())
            })?;

        tracing::info!(owner = %user.id, minutes, "focus session logged");
        Ok(record)
    }
}

#[async_trait]
impl<TSessionLog, TStats> SessionRecorder for LogFocusSessionHandler<TSessionLog, TStats>
where
    TSessionLog: SessionLog + 'static,
    TStats: AggregateStatsRepository + 'static,
{
    async fn record(&self, user: &CurrentUser, minutes: u32) -> anyhow::Result<()> {
        self.handle(user, minutes).await?;
        Ok(())
    }
}
