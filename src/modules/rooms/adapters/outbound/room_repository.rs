use crate::modules::rooms::core::room::{ChatMessage, Participant, PresenceRecord, Room};
use crate::modules::rooms::core::shared_timer::RoomTimerState;
use async_trait::async_trait;
use tokio::sync::watch;

/// Rooms and their sub-records. Writing a sub-record of a room that was
/// never created is an error.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: Room) -> anyhow::Result<()>;

    async fn get(&self, code: &str) -> anyhow::Result<Option<Room>>;

    /// Replaces the room timer. The last write wins, nothing is merged.
    async fn write_timer(&self, code: &str, state: RoomTimerState) -> anyhow::Result<()>;

    async fn timer(&self, code: &str) -> anyhow::Result<Option<RoomTimerState>>;

    /// Live view of the room timer, holding `None` until the first write.
    /// `None` when the room does not exist.
    async fn watch_timer(
        &self,
        code: &str,
    ) -> anyhow::Result<Option<watch::Receiver<Option<RoomTimerState>>>>;

    async fn add_message(&self, code: &str, message: ChatMessage) -> anyhow::Result<()>;

    /// Oldest first.
    async fn messages(&self, code: &str) -> anyhow::Result<Vec<ChatMessage>>;

    async fn upsert_participant(&self, code: &str, participant: Participant)
    -> anyhow::Result<()>;

    /// Ordered by join time, oldest first.
    async fn participants(&self, code: &str) -> anyhow::Result<Vec<Participant>>;

    async fn upsert_presence(&self, code: &str, presence: PresenceRecord) -> anyhow::Result<()>;

    async fn presence(&self, code: &str) -> anyhow::Result<Vec<PresenceRecord>>;
}
