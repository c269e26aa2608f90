use crate::shared::infrastructure::local_store::LocalStore;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryLocalStore {
    values: RwLock<HashMap<String, String>>,
    is_offline: bool,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

impl LocalStore for InMemoryLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Local store offline"));
        }
        self.values
            .write()
            .map_err(|_| anyhow::anyhow!("Local store poisoned"))?
            .insert(key.to_string(), value);
        Ok(())
    }
}
