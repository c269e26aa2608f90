// Room session.
//
// Purpose
// - The in-process view of one user sitting in one room. Backs the
//   `roomTimer` subscription.
//
// Responsibilities
// - Join the room and keep the user's presence fresh.
// - Mirror the stored room timer into a local `SharedTimer` projection.
// - Tick the projection locally between remote updates.
// - Publish every change of the projection to view subscribers.
// - Issue timer writes; failures are logged and dropped.
//
// Invariants
// - Every background task is owned by the session and stops when it drops.
// - The projection lock is never held across a repository call.

use crate::modules::rooms::adapters::outbound::room_repository::RoomRepository;
use crate::modules::rooms::core::room::{ChatMessage, HEARTBEAT_EVERY, PresenceRecord};
use crate::modules::rooms::core::shared_timer::{RoomTimerAction, SharedTimer, SharedTimerView};
use crate::modules::rooms::use_cases::manage_rooms::handler::{RoomError, RoomHandler};
use crate::modules::timer::core::settings::TimerSettings;
use crate::shared::core::primitives::{CurrentUser, RoomCode};
use crate::shared::infrastructure::change_feed::ScopedTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::{Instant, interval_at};

#[derive(Debug, Clone, Copy)]
pub struct RoomTimings {
    pub heartbeat_every: Duration,
    pub tick_every: Duration,
}

impl Default for RoomTimings {
    fn default() -> Self {
        Self {
            heartbeat_every: HEARTBEAT_EVERY,
            tick_every: Duration::from_secs(1),
        }
    }
}

/// The projection plus the channel its views are published on.
struct Projection {
    timer: Mutex<SharedTimer>,
    views: watch::Sender<SharedTimerView>,
}

impl Projection {
    fn new(timer: SharedTimer) -> Self {
        let (views, _) = watch::channel(timer.view());
        Self {
            timer: Mutex::new(timer),
            views,
        }
    }

    async fn apply<T>(&self, change: impl FnOnce(&mut SharedTimer) -> T) -> (T, SharedTimerView) {
        let mut timer = self.timer.lock().await;
        let outcome = change(&mut *timer);
        let view = timer.view();
        self.views.send_if_modified(|current| {
            let modified = *current != view;
            *current = view;
            modified
        });
        (outcome, view)
    }
}

pub struct RoomSession<TRepository>
where
    TRepository: RoomRepository + 'static,
{
    code: RoomCode,
    user: CurrentUser,
    handler: Arc<RoomHandler<TRepository>>,
    projection: Arc<Projection>,
    _tasks: Vec<ScopedTask>,
}

impl<TRepository> RoomSession<TRepository>
where
    TRepository: RoomRepository + 'static,
{
    /// Joins the room and starts the heartbeat, mirror and tick tasks.
    /// Fails when the room does not exist.
    pub async fn attach(
        handler: Arc<RoomHandler<TRepository>>,
        code: &str,
        user: CurrentUser,
        timings: RoomTimings,
    ) -> Result<Self, RoomError> {
        handler.open_room(code).await?;
        handler.join(code, &user).await?;
        if let Err(err) = handler.heartbeat(code, &user).await {
            tracing::warn!(code, user = %user.id, error = %err, "initial heartbeat failed");
        }

        let mut receiver = handler.watch_timer(code).await?;
        let mut timer = SharedTimer::new(handler.settings_for(&user).await);
        if let Some(state) = *receiver.borrow_and_update() {
            timer.on_remote_update(&handler.settle(state));
        }
        let projection = Arc::new(Projection::new(timer));

        let heartbeat = {
            let handler = handler.clone();
            let code = code.to_string();
            let user = user.clone();
            let period = timings.heartbeat_every;
            ScopedTask::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                loop {
                    interval.tick().await;
                    if let Err(err) = handler.heartbeat(&code, &user).await {
                        tracing::warn!(code = %code, user = %user.id, error = %err, "heartbeat failed");
                    }
                }
            })
        };

        let mirror = {
            let handler = handler.clone();
            let projection = projection.clone();
            ScopedTask::spawn(async move {
                while receiver.changed().await.is_ok() {
                    let latest = *receiver.borrow_and_update();
                    if let Some(state) = latest {
                        let state = handler.settle(state);
                        projection.apply(|timer| timer.on_remote_update(&state)).await;
                    }
                }
            })
        };

        let ticker = {
            let projection = projection.clone();
            let period = timings.tick_every;
            ScopedTask::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                loop {
                    interval.tick().await;
                    projection.apply(SharedTimer::tick).await;
                }
            })
        };

        tracing::info!(code, user = %user.id, "attached to room");
        Ok(Self {
            code: code.to_string(),
            user,
            handler,
            projection,
            _tasks: vec![heartbeat, mirror, ticker],
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub async fn view(&self) -> SharedTimerView {
        self.projection.timer.lock().await.view()
    }

    /// Every change of the local projection, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<SharedTimerView> {
        self.projection.views.subscribe()
    }

    pub async fn start(&self) -> SharedTimerView {
        self.request(RoomTimerAction::Start).await
    }

    pub async fn pause(&self) -> SharedTimerView {
        self.request(RoomTimerAction::Pause).await
    }

    pub async fn reset(&self) -> SharedTimerView {
        self.request(RoomTimerAction::Reset).await
    }

    /// Optimistically applies the action, writes it and clears the
    /// `updating` flag whatever the outcome.
    pub async fn request(&self, action: RoomTimerAction) -> SharedTimerView {
        let (write, _) = self.projection.apply(|timer| timer.request(action)).await;
        if let Err(err) = self.handler.write_timer(&self.code, write).await {
            tracing::error!(code = %self.code, ?action, error = %err, "room timer write failed");
        }
        let (_, view) = self.projection.apply(SharedTimer::acknowledge).await;
        view
    }

    pub async fn update_configuration(&self, settings: TimerSettings) -> SharedTimerView {
        let (_, view) = self
            .projection
            .apply(|timer| timer.update_configuration(settings))
            .await;
        view
    }

    pub async fn send_message(&self, text: &str) -> Result<ChatMessage, RoomError> {
        self.handler.send_message(&self.code, &self.user, text).await
    }

    pub async fn active_presence(&self) -> Result<Vec<PresenceRecord>, RoomError> {
        self.handler.active_presence(&self.code).await
    }
}
