use crate::modules::timer::core::settings::{TimerMode, TimerSettings};
use serde::{Deserialize, Serialize};

/// Working set of a single-user countdown. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTimerState {
    pub mode: TimerMode,
    pub seconds_left: u32,
    pub running: bool,
}

impl LocalTimerState {
    pub fn idle(settings: &TimerSettings) -> Self {
        Self {
            mode: TimerMode::Work,
            seconds_left: settings.seconds_for(TimerMode::Work),
            running: false,
        }
    }
}
