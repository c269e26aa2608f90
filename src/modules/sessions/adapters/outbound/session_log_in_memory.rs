// In memory session log and aggregate stats.
//
// Purpose
// - Exercise the session use cases without a hosted document store.
//
// Responsibilities
// - Keep session records per owner in insertion order.
// - Keep one aggregate row per owner, upserted on every increment.

use crate::modules::sessions::adapters::outbound::session_log::{
    AggregateStatsRepository, SessionLog,
};
use crate::modules::sessions::core::session::{AggregateStat, SessionRecord};
use crate::shared::core::primitives::EpochMillis;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<Vec<SessionRecord>>,
    stats: RwLock<HashMap<String, AggregateStat>>,
    is_offline: bool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self, what: &str) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("{what} repository offline"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionLog for InMemorySessionStore {
    async fn append(&self, record: SessionRecord) -> anyhow::Result<()> {
        self.ensure_online("Session log")?;
        self.sessions.write().await.push(record);
        Ok(())
    }

    async fn recent_by_owner(
        &self,
        owner: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<SessionRecord>> {
        self.ensure_online("Session log")?;
        let guard = self.sessions.read().await;
        let mut items: Vec<SessionRecord> = guard
            .iter()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect();
        items.sort_by_key(|record| Reverse(record.created_at.unwrap_or(EpochMillis::MAX)));
        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait::async_trait]
impl AggregateStatsRepository for InMemorySessionStore {
    async fn increment(
        &self,
        owner: &str,
        display_name: &str,
        minutes: u32,
        at: EpochMillis,
    ) -> anyhow::Result<AggregateStat> {
        self.ensure_online("Aggregate stats")?;
        let mut guard = self.stats.write().await;
        let current = guard
            .remove(owner)
            .unwrap_or_else(|| AggregateStat::empty(owner, display_name));
        let mut next = current.record(minutes, at);
        next.display_name = display_name.to_string();
        guard.insert(owner.to_string(), next.clone());
        Ok(next)
    }

    async fn get(&self, owner: &str) -> anyhow::Result<Option<AggregateStat>> {
        self.ensure_online("Aggregate stats")?;
        Ok(self.stats.read().await.get(owner).cloned())
    }

    async fn top_by_minutes(&self, limit: usize) -> anyhow::Result<Vec<AggregateStat>> {
        self.ensure_online("Aggregate stats")?;
        let mut rows: Vec<AggregateStat> = self.stats.read().await.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.total_minutes
                .cmp(&a.total_minutes)
                .then_with(|| a.owner.cmp(&b.owner))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod in_memory_session_store_tests {
    use super::*;
    use crate::tests::fixtures::sessions::session_at;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemorySessionStore {
        InMemorySessionStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_recent_sessions_newest_first(store: InMemorySessionStore) {
        store.append(session_at("u-1", 25, Some(1_000))).await.unwrap();
        store.append(session_at("u-1", 30, Some(3_000))).await.unwrap();
        store.append(session_at("u-2", 45, Some(2_000))).await.unwrap();
        store.append(session_at("u-1", 50, None)).await.unwrap();

        let recent = store.recent_by_owner("u-1", 2).await.unwrap();
        let minutes: Vec<u32> = recent.iter().map(|record| record.minutes).collect();
        assert_eq!(minutes, vec![50, 30]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_upsert_aggregates(store: InMemorySessionStore) {
        store.increment("u-1", "Ada", 25, 1_000).await.unwrap();
        let stat = store.increment("u-1", "Ada L.", 30, 2_000).await.unwrap();
        assert_eq!(stat.total_minutes, 55);
        assert_eq!(stat.total_sessions, 2);
        assert_eq!(stat.display_name, "Ada L.");
        assert_eq!(store.get("u-1").await.unwrap(), Some(stat));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_rank_by_total_minutes(store: InMemorySessionStore) {
        store.increment("u-1", "Ada", 25, 1).await.unwrap();
        store.increment("u-2", "Grace", 90, 1).await.unwrap();
        store.increment("u-3", "Linus", 50, 1).await.unwrap();

        let top = store.top_by_minutes(2).await.unwrap();
        let owners: Vec<&str> = top.iter().map(|row| row.owner.as_str()).collect();
        assert_eq!(owners, vec!["u-2", "u-3"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline(mut store: InMemorySessionStore) {
        store.toggle_offline();
        let result = store.append(session_at("u-1", 25, Some(1))).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Session log repository offline")
        );
    }
}
