use crate::shared::core::primitives::{EpochMillis, UserId};
use serde::{Deserialize, Serialize};

/// One completed focus phase. Created once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub owner: UserId,
    pub minutes: u32,
    pub created_at: Option<EpochMillis>,
}

/// Running totals per user. Advisory: the session log is the source of
/// truth and the two are written independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub owner: UserId,
    pub display_name: String,
    pub total_minutes: u64,
    pub total_sessions: u64,
    pub updated_at: Option<EpochMillis>,
}

impl AggregateStat {
    pub fn empty(owner: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            display_name: display_name.into(),
            total_minutes: 0,
            total_sessions: 0,
            updated_at: None,
        }
    }

    pub fn record(mut self, minutes: u32, at: EpochMillis) -> Self {
        self.total_minutes += u64::from(minutes);
        self.total_sessions += 1;
        self.updated_at = Some(at);
        self
    }
}
