use crate::modules::timer::adapters::outbound::timer_settings::TimerSettingsRepository;
use crate::modules::timer::core::settings::TimerSettings;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTimerSettings {
    rows: RwLock<HashMap<String, TimerSettings>>,
    is_offline: bool,
}

impl InMemoryTimerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl TimerSettingsRepository for InMemoryTimerSettings {
    async fn get(&self, owner: &str) -> anyhow::Result<Option<TimerSettings>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Timer settings repository offline"));
        }
        Ok(self.rows.read().await.get(owner).copied())
    }

    async fn save(&self, owner: &str, settings: TimerSettings) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Timer settings repository offline"));
        }
        self.rows.write().await.insert(owner.to_string(), settings);
        Ok(())
    }
}
