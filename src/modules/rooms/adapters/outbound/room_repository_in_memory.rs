// In memory room store.
//
// Responsibilities
// - Keep rooms, chat, participants and presence per room code.
// - Publish the room timer through a watch channel so every open view
//   observes the latest overwrite.
//
// Invariants
// - Only `create` adds entries; every other write needs the room to exist.

use crate::modules::rooms::adapters::outbound::room_repository::RoomRepository;
use crate::modules::rooms::core::room::{ChatMessage, Participant, PresenceRecord, Room};
use crate::modules::rooms::core::shared_timer::RoomTimerState;
use crate::shared::core::primitives::{EpochMillis, UserId};
use std::collections::HashMap;
use tokio::sync::{RwLock, watch};

struct RoomEntry {
    room: Room,
    timer: watch::Sender<Option<RoomTimerState>>,
    messages: Vec<ChatMessage>,
    participants: HashMap<UserId, Participant>,
    presence: HashMap<UserId, PresenceRecord>,
}

impl RoomEntry {
    fn new(room: Room) -> Self {
        let (timer, _) = watch::channel(None);
        Self {
            room,
            timer,
            messages: Vec::new(),
            participants: HashMap::new(),
            presence: HashMap::new(),
        }
    }
}

#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<String, RoomEntry>>,
    is_offline: bool,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Room repository offline"));
        }
        Ok(())
    }

    async fn update<F>(&self, code: &str, apply: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut RoomEntry),
    {
        self.ensure_online()?;
        let mut guard = self.rooms.write().await;
        let entry = guard
            .get_mut(code)
            .ok_or_else(|| anyhow::anyhow!("Room {code} does not exist"))?;
        apply(entry);
        Ok(())
    }

    async fn read<T, F>(&self, code: &str, view: F) -> anyhow::Result<Option<T>>
    where
        F: FnOnce(&RoomEntry) -> T,
    {
        self.ensure_online()?;
        Ok(self.rooms.read().await.get(code).map(view))
    }
}

// Pending timestamps sort last.
fn sort_key(at: Option<EpochMillis>) -> EpochMillis {
    at.unwrap_or(EpochMillis::MAX)
}

#[async_trait::async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: Room) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rooms.write().await;
        match guard.get_mut(&room.code) {
            Some(entry) => entry.room = room,
            None => {
                guard.insert(room.code.clone(), RoomEntry::new(room));
            }
        }
        Ok(())
    }

    async fn get(&self, code: &str) -> anyhow::Result<Option<Room>> {
        self.read(code, |entry| entry.room.clone()).await
    }

    async fn write_timer(&self, code: &str, state: RoomTimerState) -> anyhow::Result<()> {
        self.update(code, |entry| {
            entry.timer.send_replace(Some(state));
        })
        .await
    }

    async fn timer(&self, code: &str) -> anyhow::Result<Option<RoomTimerState>> {
        Ok(self.read(code, |entry| *entry.timer.borrow()).await?.flatten())
    }

    async fn watch_timer(
        &self,
        code: &str,
    ) -> anyhow::Result<Option<watch::Receiver<Option<RoomTimerState>>>> {
        self.read(code, |entry| entry.timer.subscribe()).await
    }

    async fn add_message(&self, code: &str, message: ChatMessage) -> anyhow::Result<()> {
        self.update(code, |entry| entry.messages.push(message)).await
    }

    async fn messages(&self, code: &str) -> anyhow::Result<Vec<ChatMessage>> {
        let mut messages = self
            .read(code, |entry| entry.messages.clone())
            .await?
            .unwrap_or_default();
        messages.sort_by_key(|message| sort_key(message.created_at));
        Ok(messages)
    }

    async fn upsert_participant(
        &self,
        code: &str,
        participant: Participant,
    ) -> anyhow::Result<()> {
        self.update(code, |entry| {
            entry
                .participants
                .insert(participant.user_id.clone(), participant);
        })
        .await
    }

    async fn participants(&self, code: &str) -> anyhow::Result<Vec<Participant>> {
        let mut participants: Vec<Participant> = self
            .read(code, |entry| entry.participants.values().cloned().collect())
            .await?
            .unwrap_or_default();
        participants.sort_by(|a, b| {
            sort_key(a.joined_at)
                .cmp(&sort_key(b.joined_at))
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(participants)
    }

    async fn upsert_presence(&self, code: &str, presence: PresenceRecord) -> anyhow::Result<()> {
        self.update(code, |entry| {
            entry.presence.insert(presence.user_id.clone(), presence);
        })
        .await
    }

    async fn presence(&self, code: &str) -> anyhow::Result<Vec<PresenceRecord>> {
        let mut records: Vec<PresenceRecord> = self
            .read(code, |entry| entry.presence.values().cloned().collect())
            .await?
            .unwrap_or_default();
        records.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(records)
    }
}
