use crate::shared::core::primitives::{EpochMillis, RoomCode, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// A presence record older than this no longer counts as active.
pub const PRESENCE_TTL_MS: EpochMillis = 60_000;

/// How often an open room view refreshes its presence record.
pub const HEARTBEAT_EVERY: Duration = Duration::from_secs(25);

pub const DEFAULT_ROOM_NAME: &str = "Study room";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoomRuleError {
    #[error("message text must not be empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub code: RoomCode,
    pub name: String,
    pub created_at: Option<EpochMillis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: String,
    pub author_id: UserId,
    pub display_name: String,
    pub text: String,
    pub created_at: Option<EpochMillis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub display_name: String,
    pub joined_at: Option<EpochMillis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub last_active: Option<EpochMillis>,
}

/// `room-<base36 millis>-<random>`. Nobody checks for collisions.
pub fn generate_room_code(now: EpochMillis, random: &str) -> RoomCode {
    let millis = u64::try_from(now).unwrap_or_default();
    let fragment: String = random.chars().take(6).collect();
    format!("room-{}-{fragment}", to_base36(millis))
}

/// Six lowercase base36 characters for a fresh room code.
pub fn random_fragment() -> String {
    Uuid::new_v4().simple().to_string().chars().take(6).collect()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

pub fn decide_message(text: &str) -> Result<String, RoomRuleError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RoomRuleError::EmptyMessage);
    }
    Ok(text.to_string())
}

/// Records whose heartbeat is known and strictly younger than the TTL.
pub fn active_presence(records: &[PresenceRecord], now: EpochMillis) -> Vec<PresenceRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .last_active
                .is_some_and(|last_active| now - last_active < PRESENCE_TTL_MS)
        })
        .cloned()
        .collect()
}
