// Shared builders for session records used across unit and e2e tests.

use crate::modules::sessions::core::session::SessionRecord;
use crate::shared::core::primitives::EpochMillis;
use uuid::Uuid;

pub fn session_at(owner: &str, minutes: u32, created_at: Option<EpochMillis>) -> SessionRecord {
    SessionRecord {
        session_id: Uuid::now_v7().to_string(),
        owner: owner.to_string(),
        minutes,
        created_at,
    }
}
