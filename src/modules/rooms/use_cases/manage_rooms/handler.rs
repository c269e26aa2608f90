use crate::modules::rooms::adapters::outbound::room_repository::RoomRepository;
use crate::modules::rooms::core::room::{
    ChatMessage, DEFAULT_ROOM_NAME, Participant, PresenceRecord, Room, RoomRuleError,
    active_presence, decide_message, generate_room_code, random_fragment,
};
use crate::modules::rooms::core::shared_timer::{
    RoomTimerAction, RoomTimerState, RoomTimerWrite, SharedTimer,
};
use crate::modules::timer::core::settings::TimerSettings;
use crate::modules::timer::use_cases::timer_settings::handler::TimerSettingsHandler;
use crate::shared::core::primitives::{Clock, CurrentUser};
use crate::shared::infrastructure::change_feed::{Change, ChangeFeed};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(String),

    #[error("domain rejected: {0}")]
    Domain(#[from] RoomRuleError),

    #[error("room repository failed: {0}")]
    Repository(String),
}

/// Everything an open room shows at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub room: Room,
    pub timer: Option<RoomTimerState>,
    pub participants: Vec<Participant>,
    pub messages: Vec<ChatMessage>,
    pub active: Vec<PresenceRecord>,
}

pub struct RoomHandler<TRepository>
where
    TRepository: RoomRepository + 'static,
{
    repository: Arc<TRepository>,
    settings: Arc<TimerSettingsHandler>,
    clock: Arc<dyn Clock>,
    feed: ChangeFeed,
}

impl<TRepository> RoomHandler<TRepository>
where
    TRepository: RoomRepository + 'static,
{
    pub fn new(
        repository: Arc<TRepository>,
        settings: Arc<TimerSettingsHandler>,
        clock: Arc<dyn Clock>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            repository,
            settings,
            clock,
            feed,
        }
    }

    pub async fn create_room(&self, name: Option<String>) -> Result<Room, RoomError> {
        let now = self.clock.now_millis();
        let name = name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string());
        let room = Room {
            code: generate_room_code(now, &random_fragment()),
            name,
            created_at: Some(now),
        };

        self.repository
            .create(room.clone())
            .await
            .map_err(repository_error)?;
        tracing::info!(code = %room.code, "room created");
        Ok(room)
    }

    pub async fn open_room(&self, code: &str) -> Result<RoomView, RoomError> {
        let room = self.require_room(code).await?;
        let timer = self.repository.timer(code).await.map_err(repository_error)?;
        let participants = self
            .repository
            .participants(code)
            .await
            .map_err(repository_error)?;
        let messages = self
            .repository
            .messages(code)
            .await
            .map_err(repository_error)?;
        let active = self.active_presence(code).await?;

        Ok(RoomView {
            room,
            timer,
            participants,
            messages,
            active,
        })
    }

    /// Adds the user to the participant list, refreshing the join time when
    /// they were already there.
    pub async fn join(&self, code: &str, user: &CurrentUser) -> Result<Participant, RoomError> {
        self.require_room(code).await?;
        let participant = Participant {
            user_id: user.id.clone(),
            display_name: user.display_name.clone(),
            joined_at: Some(self.clock.now_millis()),
        };
        self.repository
            .upsert_participant(code, participant.clone())
            .await
            .map_err(repository_error)?;
        self.notify(code);
        Ok(participant)
    }

    pub async fn send_message(
        &self,
        code: &str,
        user: &CurrentUser,
        text: &str,
    ) -> Result<ChatMessage, RoomError> {
        let text = decide_message(text)?;
        self.require_room(code).await?;
        let message = ChatMessage {
            message_id: Uuid::now_v7().to_string(),
            author_id: user.id.clone(),
            display_name: user.display_name.clone(),
            text,
            created_at: Some(self.clock.now_millis()),
        };
        self.repository
            .add_message(code, message.clone())
            .await
            .map_err(repository_error)?;
        self.notify(code);
        Ok(message)
    }

    pub async fn messages(&self, code: &str) -> Result<Vec<ChatMessage>, RoomError> {
        self.require_room(code).await?;
        self.repository
            .messages(code)
            .await
            .map_err(repository_error)
    }

    pub async fn heartbeat(
        &self,
        code: &str,
        user: &CurrentUser,
    ) -> Result<PresenceRecord, RoomError> {
        self.require_room(code).await?;
        let record = PresenceRecord {
            user_id: user.id.clone(),
            display_name: user.display_name.clone(),
            last_active: Some(self.clock.now_millis()),
        };
        self.repository
            .upsert_presence(code, record.clone())
            .await
            .map_err(repository_error)?;
        Ok(record)
    }

    pub async fn active_presence(&self, code: &str) -> Result<Vec<PresenceRecord>, RoomError> {
        let records = self
            .repository
            .presence(code)
            .await
            .map_err(repository_error)?;
        Ok(active_presence(&records, self.clock.now_millis()))
    }

    pub async fn timer(&self, code: &str) -> Result<Option<RoomTimerState>, RoomError> {
        self.require_room(code).await?;
        self.repository.timer(code).await.map_err(repository_error)
    }

    /// Applies an action to the room timer as it stands now and overwrites
    /// the stored record with the outcome. A running record has the time
    /// since its last write taken off first.
    pub async fn timer_action(
        &self,
        code: &str,
        user: &CurrentUser,
        action: RoomTimerAction,
    ) -> Result<RoomTimerState, RoomError> {
        let current = self.timer(code).await?;
        let mut projection = SharedTimer::new(self.settings_for(user).await);
        if let Some(current) = current {
            projection.on_remote_update(&self.settle(current));
        }
        let write = projection.request(action);
        self.write_timer(code, write).await
    }

    /// Stamps and stores a full timer overwrite.
    pub async fn write_timer(
        &self,
        code: &str,
        write: RoomTimerWrite,
    ) -> Result<RoomTimerState, RoomError> {
        self.require_room(code).await?;
        let state = write.stamped(self.clock.now_millis());
        self.repository
            .write_timer(code, state)
            .await
            .map_err(repository_error)?;
        tracing::debug!(
            code,
            running = state.running,
            seconds_left = state.seconds_left,
            "room timer written"
        );
        self.notify(code);
        Ok(state)
    }

    pub async fn watch_timer(
        &self,
        code: &str,
    ) -> Result<watch::Receiver<Option<RoomTimerState>>, RoomError> {
        self.repository
            .watch_timer(code)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| RoomError::NotFound(code.to_string()))
    }

    /// The stored record with the running time since its write applied.
    pub fn settle(&self, state: RoomTimerState) -> RoomTimerState {
        state.as_of(self.clock.now_millis())
    }

    pub async fn settings_for(&self, user: &CurrentUser) -> TimerSettings {
        self.settings.load(&user.id).await
    }

    async fn require_room(&self, code: &str) -> Result<Room, RoomError> {
        self.repository
            .get(code)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| RoomError::NotFound(code.to_string()))
    }

    fn notify(&self, code: &str) {
        self.feed.publish(Change::Room {
            code: code.to_string(),
        });
    }
}

fn repository_error(err: anyhow::Error) -> RoomError {
    tracing::error!(error = %err, "room repository call failed");
    RoomError::Repository(err.to_string())
}
