use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    pub fn other(self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::Break => "break",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("{field} must be a positive number of minutes")]
    InvalidDuration { field: &'static str },
}

/// Focus and break lengths in minutes. Both are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerSettings {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, TimerError> {
        if work_minutes == 0 {
            return Err(TimerError::InvalidDuration {
                field: "work_minutes",
            });
        }
        if break_minutes == 0 {
            return Err(TimerError::InvalidDuration {
                field: "break_minutes",
            });
        }
        Ok(Self {
            work_minutes,
            break_minutes,
        })
    }

    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::Break => self.break_minutes,
        }
    }

    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode).saturating_mul(60)
    }
}
