use crate::modules::timer::adapters::outbound::timer_settings::TimerSettingsRepository;
use crate::modules::timer::core::settings::{TimerError, TimerSettings};
use std::sync::Arc;

pub struct TimerSettingsHandler {
    repository: Arc<dyn TimerSettingsRepository>,
}

impl TimerSettingsHandler {
    pub fn new(repository: Arc<dyn TimerSettingsRepository>) -> Self {
        Self { repository }
    }

    /// Stored settings, or the defaults when there are none or the store
    /// cannot be reached.
    pub async fn load(&self, owner: &str) -> TimerSettings {
        match self.repository.get(owner).await {
            Ok(Some(settings)) => settings,
            Ok(None) => TimerSettings::default(),
            Err(err) => {
                tracing::error!(owner, error = %err, "failed to load timer settings");
                TimerSettings::default()
            }
        }
    }

    /// Validates and persists new durations. A failed write is logged and
    /// the validated settings are still returned so callers can apply them
    /// locally.
    pub async fn update(
        &self,
        owner: &str,
        work_minutes: u32,
        break_minutes: u32,
    ) -> Result<TimerSettings, TimerError> {
        let settings = TimerSettings::new(work_minutes, break_minutes)?;
        if let Err(err) = self.repository.save(owner, settings).await {
            tracing::error!(owner, error = %err, "failed to save timer settings");
        }
        Ok(settings)
    }
}
