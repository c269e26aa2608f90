use crate::modules::sessions::core::session::{AggregateStat, SessionRecord};
use crate::shared::core::primitives::EpochMillis;
use async_trait::async_trait;

/// The `sessions` collection: append-only.
#[async_trait]
pub trait SessionLog: Send + Sync {
    async fn append(&self, record: SessionRecord) -> anyhow::Result<()>;

    /// Most recent first. Records still waiting for a timestamp sort as the
    /// newest.
    async fn recent_by_owner(&self, owner: &str, limit: usize)
    -> anyhow::Result<Vec<SessionRecord>>;
}

/// The `aggregateStats` collection, keyed by owner.
#[async_trait]
pub trait AggregateStatsRepository: Send + Sync {
    async fn increment(
        &self,
        owner: &str,
        display_name: &str,
        minutes: u32,
        at: EpochMillis,
    ) -> anyhow::Result<AggregateStat>;

    async fn get(&self, owner: &str) -> anyhow::Result<Option<AggregateStat>>;

    async fn top_by_minutes(&self, limit: usize) -> anyhow::Result<Vec<AggregateStat>>;
}
