use crate::modules::timer::core::settings::TimerMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A focus phase reached zero. `minutes` is the configured focus length
    /// at that moment, not measured wall-clock time.
    SessionCompleted { minutes: u32 },
    PhaseChanged { mode: TimerMode },
}
