use crate::shared::infrastructure::local_store::LocalStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Local store backed by one JSON object on disk. The whole file is
/// rewritten on every `set`.
pub struct JsonFileLocalStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonFileLocalStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "preferences file is malformed, starting empty");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "preferences file unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: RwLock::new(values),
        }
    }
}

impl LocalStore for JsonFileLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        let mut guard = self
            .values
            .write()
            .map_err(|_| anyhow::anyhow!("Local store poisoned"))?;
        guard.insert(key.to_string(), value);
        fs::write(&self.path, serde_json::to_string_pretty(&*guard)?)?;
        Ok(())
    }
}
