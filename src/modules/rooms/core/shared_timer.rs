use crate::modules::timer::core::settings::{TimerMode, TimerSettings};
use crate::shared::core::primitives::EpochMillis;
use serde::{Deserialize, Serialize};

/// The authoritative timer of a room, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTimerState {
    pub mode: TimerMode,
    pub seconds_left: u32,
    pub running: bool,
    pub updated_at: Option<EpochMillis>,
}

impl RoomTimerState {
    /// The record as it stands at `now`. A running countdown loses the whole
    /// seconds elapsed since it was written and stops at zero.
    pub fn as_of(self, now: EpochMillis) -> RoomTimerState {
        match (self.running, self.updated_at) {
            (true, Some(written)) if now > written => {
                let elapsed = u32::try_from((now - written) / 1000).unwrap_or(u32::MAX);
                RoomTimerState {
                    seconds_left: self.seconds_left.saturating_sub(elapsed),
                    ..self
                }
            }
            _ => self,
        }
    }
}

/// What a participant writes. Always a full overwrite; the store adds
/// `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTimerWrite {
    pub mode: TimerMode,
    pub seconds_left: u32,
    pub running: bool,
}

impl RoomTimerWrite {
    pub fn stamped(self, at: EpochMillis) -> RoomTimerState {
        RoomTimerState {
            mode: self.mode,
            seconds_left: self.seconds_left,
            running: self.running,
            updated_at: Some(at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTimerAction {
    Start,
    Pause,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedTimerView {
    pub mode: TimerMode,
    pub seconds_left: u32,
    pub running: bool,
    pub updating: bool,
}

/// One participant's projection of a room timer.
///
/// Requests never block each other: `updating` only reports that a write is
/// in flight. The projection is updated optimistically and is not rolled
/// back when a write fails; the next remote update wins.
#[derive(Debug, Clone)]
pub struct SharedTimer {
    mode: TimerMode,
    seconds_left: u32,
    running: bool,
    updating: bool,
    settings: TimerSettings,
}

impl SharedTimer {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            mode: TimerMode::Work,
            seconds_left: settings.seconds_for(TimerMode::Work),
            running: false,
            updating: false,
            settings,
        }
    }

    pub fn view(&self) -> SharedTimerView {
        SharedTimerView {
            mode: self.mode,
            seconds_left: self.seconds_left,
            running: self.running,
            updating: self.updating,
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Replaces the projection with the observed record, field by field.
    pub fn on_remote_update(&mut self, state: &RoomTimerState) {
        self.mode = state.mode;
        self.seconds_left = state.seconds_left;
        self.running = state.running;
    }

    pub fn request(&mut self, action: RoomTimerAction) -> RoomTimerWrite {
        match action {
            RoomTimerAction::Start => self.request_start(),
            RoomTimerAction::Pause => self.request_pause(),
            RoomTimerAction::Reset => self.request_reset(),
        }
    }

    pub fn request_start(&mut self) -> RoomTimerWrite {
        self.issue(self.mode, self.seconds_left, true)
    }

    pub fn request_pause(&mut self) -> RoomTimerWrite {
        self.issue(self.mode, self.seconds_left, false)
    }

    /// Restarts the current phase from its full length. The phase is kept.
    pub fn request_reset(&mut self) -> RoomTimerWrite {
        self.issue(self.mode, self.settings.seconds_for(self.mode), false)
    }

    /// The write finished, successfully or not.
    pub fn acknowledge(&mut self) {
        self.updating = false;
    }

    /// Local one-second decrement of the mirror while running. Stops at zero;
    /// phase changes only ever arrive as writes.
    pub fn tick(&mut self) {
        if self.running && self.seconds_left > 0 {
            self.seconds_left -= 1;
        }
    }

    /// New durations apply to the countdown only while it is stopped.
    pub fn update_configuration(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if !self.running {
            self.seconds_left = settings.seconds_for(self.mode);
        }
    }

    fn issue(&mut self, mode: TimerMode, seconds_left: u32, running: bool) -> RoomTimerWrite {
        self.updating = true;
        self.mode = mode;
        self.seconds_left = seconds_left;
        self.running = running;
        RoomTimerWrite {
            mode,
            seconds_left,
            running,
        }
    }
}
