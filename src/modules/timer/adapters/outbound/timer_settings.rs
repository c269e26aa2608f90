use crate::modules::timer::core::settings::TimerSettings;
use async_trait::async_trait;

/// Per-user durations, the `userTimerSettings` collection.
#[async_trait]
pub trait TimerSettingsRepository: Send + Sync {
    async fn get(&self, owner: &str) -> anyhow::Result<Option<TimerSettings>>;
    async fn save(&self, owner: &str, settings: TimerSettings) -> anyhow::Result<()>;
}
