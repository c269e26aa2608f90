use async_graphql::{Context, Enum, ID, Object, Result as GqlResult, SimpleObject, Subscription};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::modules::rooms::core::room::{ChatMessage, Participant, PresenceRecord, Room};
use crate::modules::rooms::core::shared_timer::{RoomTimerAction, RoomTimerState, SharedTimerView};
use crate::modules::rooms::use_cases::manage_rooms::handler::RoomView;
use crate::modules::rooms::use_cases::manage_rooms::session::{RoomSession, RoomTimings};
use crate::shared::core::primitives::CurrentUser;
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlRoomTimerAction {
    Start,
    Pause,
    Reset,
}

impl From<GqlRoomTimerAction> for RoomTimerAction {
    fn from(action: GqlRoomTimerAction) -> Self {
        match action {
            GqlRoomTimerAction::Start => RoomTimerAction::Start,
            GqlRoomTimerAction::Pause => RoomTimerAction::Pause,
            GqlRoomTimerAction::Reset => RoomTimerAction::Reset,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlRoom {
    pub code: ID,
    pub name: String,
    pub created_at: Option<i64>,
}

impl From<Room> for GqlRoom {
    fn from(room: Room) -> Self {
        Self {
            code: ID(room.code),
            name: room.name,
            created_at: room.created_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlRoomTimer {
    pub mode: String,
    pub seconds_left: u32,
    pub running: bool,
    pub updated_at: Option<i64>,
}

impl From<RoomTimerState> for GqlRoomTimer {
    fn from(timer: RoomTimerState) -> Self {
        Self {
            mode: timer.mode.as_str().to_string(),
            seconds_left: timer.seconds_left,
            running: timer.running,
            updated_at: timer.updated_at,
        }
    }
}

/// One participant's live projection of the room timer.
#[derive(SimpleObject, Clone)]
pub struct GqlSharedTimer {
    pub mode: String,
    pub seconds_left: u32,
    pub running: bool,
    pub updating: bool,
}

impl From<SharedTimerView> for GqlSharedTimer {
    fn from(view: SharedTimerView) -> Self {
        Self {
            mode: view.mode.as_str().to_string(),
            seconds_left: view.seconds_left,
            running: view.running,
            updating: view.updating,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlChatMessage {
    pub message_id: ID,
    pub author_id: String,
    pub display_name: String,
    pub text: String,
    pub created_at: Option<i64>,
}

impl From<ChatMessage> for GqlChatMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            message_id: ID(message.message_id),
            author_id: message.author_id,
            display_name: message.display_name,
            text: message.text,
            created_at: message.created_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlParticipant {
    pub user_id: String,
    pub display_name: String,
    pub joined_at: Option<i64>,
}

impl From<Participant> for GqlParticipant {
    fn from(participant: Participant) -> Self {
        Self {
            user_id: participant.user_id,
            display_name: participant.display_name,
            joined_at: participant.joined_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPresence {
    pub user_id: String,
    pub display_name: String,
    pub last_active: Option<i64>,
}

impl From<PresenceRecord> for GqlPresence {
    fn from(record: PresenceRecord) -> Self {
        Self {
            user_id: record.user_id,
            display_name: record.display_name,
            last_active: record.last_active,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlRoomView {
    pub room: GqlRoom,
    pub timer: Option<GqlRoomTimer>,
    pub participants: Vec<GqlParticipant>,
    pub messages: Vec<GqlChatMessage>,
    pub active: Vec<GqlPresence>,
}

impl From<RoomView> for GqlRoomView {
    fn from(view: RoomView) -> Self {
        Self {
            room: view.room.into(),
            timer: view.timer.map(Into::into),
            participants: view.participants.into_iter().map(Into::into).collect(),
            messages: view.messages.into_iter().map(Into::into).collect(),
            active: view.active.into_iter().map(Into::into).collect(),
        }
    }
}

fn gql_error(err: impl std::fmt::Display) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

#[derive(Default)]
pub struct RoomsQuery;

#[Object]
impl RoomsQuery {
    async fn room(&self, context: &Context<'_>, code: ID) -> GqlResult<GqlRoomView> {
        let state = context.data_unchecked::<AppState>();
        let view = state.rooms.open_room(&code).await.map_err(gql_error)?;
        Ok(view.into())
    }

    async fn active_presence(&self, context: &Context<'_>, code: ID) -> GqlResult<Vec<GqlPresence>> {
        let state = context.data_unchecked::<AppState>();
        let records = state
            .rooms
            .active_presence(&code)
            .await
            .map_err(gql_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct RoomsMutation;

#[Object]
impl RoomsMutation {
    async fn create_room(&self, context: &Context<'_>, name: Option<String>) -> GqlResult<GqlRoom> {
        let state = context.data_unchecked::<AppState>();
        let room = state.rooms.create_room(name).await.map_err(gql_error)?;
        Ok(room.into())
    }

    async fn join_room(
        &self,
        context: &Context<'_>,
        user_id: String,
        display_name: Option<String>,
        code: ID,
    ) -> GqlResult<GqlParticipant> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, display_name);
        let participant = state.rooms.join(&code, &user).await.map_err(gql_error)?;
        Ok(participant.into())
    }

    async fn send_message(
        &self,
        context: &Context<'_>,
        user_id: String,
        display_name: Option<String>,
        code: ID,
        text: String,
    ) -> GqlResult<GqlChatMessage> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, display_name);
        let message = state
            .rooms
            .send_message(&code, &user, &text)
            .await
            .map_err(gql_error)?;
        Ok(message.into())
    }

    async fn heartbeat(
        &self,
        context: &Context<'_>,
        user_id: String,
        display_name: Option<String>,
        code: ID,
    ) -> GqlResult<GqlPresence> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, display_name);
        let record = state.rooms.heartbeat(&code, &user).await.map_err(gql_error)?;
        Ok(record.into())
    }

    async fn room_timer(
        &self,
        context: &Context<'_>,
        user_id: String,
        code: ID,
        action: GqlRoomTimerAction,
    ) -> GqlResult<GqlRoomTimer> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, None);
        let timer = state
            .rooms
            .timer_action(&code, &user, action.into())
            .await
            .map_err(gql_error)?;
        Ok(timer.into())
    }
}

#[derive(Default)]
pub struct RoomsSubscription;

#[Subscription]
impl RoomsSubscription {
    /// Sits the caller in the room for as long as the subscription is open:
    /// joins, keeps presence fresh and streams the locally ticking timer.
    async fn room_timer(
        &self,
        context: &Context<'_>,
        user_id: String,
        display_name: Option<String>,
        code: ID,
    ) -> async_graphql::Result<impl Stream<Item = GqlSharedTimer>> {
        let state = context.data_unchecked::<AppState>();
        let user = CurrentUser::new(user_id, display_name);
        let session = RoomSession::attach(state.rooms.clone(), &code, user, RoomTimings::default())
            .await
            .map_err(gql_error)?;

        Ok(WatchStream::new(session.subscribe()).map(move |view| {
            // Dropping the stream detaches the session.
            let _attached = &session;
            GqlSharedTimer::from(view)
        }))
    }
}
