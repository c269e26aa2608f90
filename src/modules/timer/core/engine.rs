use crate::modules::timer::core::events::TimerEvent;
use crate::modules::timer::core::settings::{TimerError, TimerMode, TimerSettings};
use crate::modules::timer::core::state::LocalTimerState;

/// Two-phase countdown: work, break, work, break, ...
///
/// The engine owns no clock. Whoever drives it calls `tick` once per second
/// while it is running and forwards the returned events.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: LocalTimerState,
    settings: TimerSettings,
    loading: bool,
}

impl TimerEngine {
    /// Engine whose settings have not arrived yet. It refuses to start until
    /// `load_settings` is called.
    pub fn loading() -> Self {
        let settings = TimerSettings::default();
        Self {
            state: LocalTimerState::idle(&settings),
            settings,
            loading: true,
        }
    }

    pub fn with_settings(settings: TimerSettings) -> Self {
        Self {
            state: LocalTimerState::idle(&settings),
            settings,
            loading: false,
        }
    }

    pub fn state(&self) -> LocalTimerState {
        self.state
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_settings(&mut self, settings: TimerSettings) {
        self.loading = false;
        self.apply(settings);
    }

    pub fn start(&mut self) -> bool {
        if self.loading || self.state.running {
            return false;
        }
        self.state.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    pub fn reset(&mut self) {
        self.state = LocalTimerState::idle(&self.settings);
    }

    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.state.running || self.loading {
            return Vec::new();
        }
        if self.state.seconds_left > 0 {
            self.state.seconds_left -= 1;
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if self.state.mode == TimerMode::Work {
            events.push(TimerEvent::SessionCompleted {
                minutes: self.settings.work_minutes,
            });
        }
        let next = self.state.mode.other();
        self.state.mode = next;
        self.state.seconds_left = self.settings.seconds_for(next);
        events.push(TimerEvent::PhaseChanged { mode: next });
        events
    }

    /// Replaces the durations. Zero values are rejected and nothing changes.
    /// While idle, a change to the active phase's length resets the
    /// countdown; while running it only applies from the next phase.
    pub fn update_configuration(
        &mut self,
        work_minutes: u32,
        break_minutes: u32,
    ) -> Result<TimerSettings, TimerError> {
        let settings = TimerSettings::new(work_minutes, break_minutes)?;
        self.apply(settings);
        Ok(settings)
    }

    fn apply(&mut self, settings: TimerSettings) {
        let mode = self.state.mode;
        let active_changed = settings.minutes_for(mode) != self.settings.minutes_for(mode);
        self.settings = settings;
        if !self.state.running && active_changed {
            self.state.seconds_left = settings.seconds_for(mode);
        }
    }
}
