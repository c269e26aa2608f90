// Personal timers.
//
// Purpose
// - Host one focus timer per user inside the service.
//
// Responsibilities
// - Own each user's `TimerEngine` and the ticker task driving it.
// - Forward completed focus phases to the session recorder.
// - Tear the ticker down on pause, reset and close.
//
// Invariants
// - At most one ticker per user; it runs only while the engine runs.
// - The engine map lock is never held across the recorder call.
// - A recording runs on its own task; stopping the ticker never cancels it.

use crate::modules::timer::adapters::outbound::session_recorder::SessionRecorder;
use crate::modules::timer::core::engine::TimerEngine;
use crate::modules::timer::core::events::TimerEvent;
use crate::modules::timer::core::settings::TimerSettings;
use crate::modules::timer::core::state::LocalTimerState;
use crate::modules::timer::use_cases::timer_settings::handler::TimerSettingsHandler;
use crate::shared::core::primitives::{CurrentUser, UserId};
use crate::shared::infrastructure::change_feed::ScopedTask;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerRunError {
    #[error("no timer is open for this user")]
    NotOpen,

    #[error("timer settings are still loading")]
    SettingsLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub state: LocalTimerState,
    #[serde(flatten)]
    pub settings: TimerSettings,
    pub loading: bool,
}

impl TimerSnapshot {
    fn of(engine: &TimerEngine) -> Self {
        Self {
            state: engine.state(),
            settings: engine.settings(),
            loading: engine.is_loading(),
        }
    }
}

struct TimerSlot {
    user: CurrentUser,
    engine: TimerEngine,
    ticker: Option<ScopedTask>,
}

type Slots = Arc<Mutex<HashMap<UserId, TimerSlot>>>;

pub struct PersonalTimers {
    slots: Slots,
    settings: Arc<TimerSettingsHandler>,
    recorder: Arc<dyn SessionRecorder>,
    tick_period: Duration,
}

impl PersonalTimers {
    pub fn new(
        settings: Arc<TimerSettingsHandler>,
        recorder: Arc<dyn SessionRecorder>,
        tick_period: Duration,
    ) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            settings,
            recorder,
            tick_period,
        }
    }

    /// Creates the user's timer if needed and loads their settings into it.
    /// Until the settings arrive the timer refuses to start.
    pub async fn open(&self, user: &CurrentUser) -> TimerSnapshot {
        {
            let mut slots = self.slots.lock().await;
            if let Some(slot) = slots.get_mut(&user.id) {
                slot.user = user.clone();
                return TimerSnapshot::of(&slot.engine);
            }
            slots.insert(
                user.id.clone(),
                TimerSlot {
                    user: user.clone(),
                    engine: TimerEngine::loading(),
                    ticker: None,
                },
            );
        }

        let settings = self.settings.load(&user.id).await;

        let mut slots = self.slots.lock().await;
        match slots.get_mut(&user.id) {
            Some(slot) => {
                if slot.engine.is_loading() {
                    slot.engine.load_settings(settings);
                }
                TimerSnapshot::of(&slot.engine)
            }
            // Closed while the settings were loading.
            None => TimerSnapshot::of(&TimerEngine::with_settings(settings)),
        }
    }

    pub async fn start(&self, owner: &str) -> Result<TimerSnapshot, TimerRunError> {
        let mut slots = self.slots.lock().await;
        let slot = slots.get_mut(owner).ok_or(TimerRunError::NotOpen)?;
        if slot.engine.is_loading() {
            return Err(TimerRunError::SettingsLoading);
        }
        if slot.engine.start() {
            slot.ticker = Some(self.spawn_ticker(owner.to_string()));
            tracing::debug!(owner, "personal timer started");
        }
        Ok(TimerSnapshot::of(&slot.engine))
    }

    pub async fn pause(&self, owner: &str) -> Result<TimerSnapshot, TimerRunError> {
        let mut slots = self.slots.lock().await;
        let slot = slots.get_mut(owner).ok_or(TimerRunError::NotOpen)?;
        slot.engine.pause();
        slot.ticker = None;
        Ok(TimerSnapshot::of(&slot.engine))
    }

    pub async fn reset(&self, owner: &str) -> Result<TimerSnapshot, TimerRunError> {
        let mut slots = self.slots.lock().await;
        let slot = slots.get_mut(owner).ok_or(TimerRunError::NotOpen)?;
        slot.engine.reset();
        slot.ticker = None;
        Ok(TimerSnapshot::of(&slot.engine))
    }

    pub async fn snapshot(&self, owner: &str) -> Option<TimerSnapshot> {
        let slots = self.slots.lock().await;
        slots.get(owner).map(|slot| TimerSnapshot::of(&slot.engine))
    }

    /// Pushes new durations into an open timer. Returns `None` when the user
    /// has no timer open.
    pub async fn apply_settings(
        &self,
        owner: &str,
        settings: TimerSettings,
    ) -> Option<TimerSnapshot> {
        let mut slots = self.slots.lock().await;
        let slot = slots.get_mut(owner)?;
        if slot.engine.is_loading() {
            slot.engine.load_settings(settings);
        } else if let Err(err) = slot
            .engine
            .update_configuration(settings.work_minutes, settings.break_minutes)
        {
            tracing::warn!(owner, error = %err, "ignored invalid timer settings");
        }
        Some(TimerSnapshot::of(&slot.engine))
    }

    /// Drops the user's timer and stops its ticker. Returns `false` when no
    /// timer was open.
    pub async fn close(&self, owner: &str) -> bool {
        self.slots.lock().await.remove(owner).is_some()
    }

    /// Advances the user's timer by one second, exactly as its ticker does.
    pub async fn tick(&self, owner: &str) -> Vec<TimerEvent> {
        advance(&self.slots, &self.recorder, owner)
            .await
            .unwrap_or_default()
    }

    fn spawn_ticker(&self, owner: UserId) -> ScopedTask {
        let slots = self.slots.clone();
        let recorder = self.recorder.clone();
        let period = self.tick_period;

        ScopedTask::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if advance(&slots, &recorder, &owner).await.is_none() {
                    break;
                }
            }
        })
    }
}

// One tick of one user's engine. `None` once the timer is gone or stopped.
async fn advance(
    slots: &Mutex<HashMap<UserId, TimerSlot>>,
    recorder: &Arc<dyn SessionRecorder>,
    owner: &str,
) -> Option<Vec<TimerEvent>> {
    let (user, events) = {
        let mut slots = slots.lock().await;
        let slot = slots.get_mut(owner)?;
        if !slot.engine.state().running {
            return None;
        }
        (slot.user.clone(), slot.engine.tick())
    };

    let mut recordings = Vec::new();
    for event in &events {
        match event {
            TimerEvent::SessionCompleted { minutes } => {
                recordings.push(spawn_recording(recorder.clone(), user.clone(), *minutes));
            }
            TimerEvent::PhaseChanged { mode } => {
                tracing::info!(owner, mode = mode.as_str(), "personal timer phase changed");
            }
        }
    }

    // An abort while waiting here leaves the recording running.
    for recording in recordings {
        if let Err(err) = recording.await {
            tracing::error!(owner, error = %err, "session recording task failed");
        }
    }
    Some(events)
}

fn spawn_recording(
    recorder: Arc<dyn SessionRecorder>,
    user: CurrentUser,
    minutes: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = recorder.record(&user, minutes).await {
            tracing::error!(owner = %user.id, minutes, error = %err, "failed to record focus session");
        }
    })
}
