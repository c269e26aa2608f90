use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub type UserId = String;
pub type RoomCode = String;

/// All timestamps are epoch milliseconds. `None` means the store has not
/// assigned one yet.
pub type EpochMillis = i64;

/// Identity of the caller, resolved once at the edge and passed down
/// explicitly instead of being looked up globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub display_name: String,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Guest".to_string());
        Self {
            id: id.into(),
            display_name,
        }
    }
}

/// The browsing session a request comes from. Device-local data (goals,
/// theme, guest tasks) is kept per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> EpochMillis;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> EpochMillis {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn at(now: EpochMillis) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: EpochMillis) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> EpochMillis {
        self.now.load(Ordering::SeqCst)
    }
}
