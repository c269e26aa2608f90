use crate::modules::tasks::core::guest_task::{GUEST_TASKS_KEY, GuestTask};
use crate::shared::infrastructure::local_store::{LocalStore, ScopedStore, load_json, save_json};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GuestTaskError {
    #[error("task text must not be empty")]
    EmptyText,

    #[error("task {0} not found")]
    NotFound(String),

    #[error("local store write failed: {0}")]
    Store(String),
}

/// The signed-out task list: one JSON array per client in the local store,
/// rewritten on every change.
pub struct GuestTaskHandler {
    store: Arc<dyn LocalStore>,
    // Serializes read-modify-write of the stored arrays.
    write_lock: Mutex<()>,
}

impl GuestTaskHandler {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list(&self, client: &str) -> Vec<GuestTask> {
        load_json(&self.scoped(client), GUEST_TASKS_KEY)
    }

    pub async fn add(&self, client: &str, text: &str) -> Result<GuestTask, GuestTaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GuestTaskError::EmptyText);
        }
        let task = GuestTask {
            id: Uuid::now_v7().to_string(),
            text: text.to_string(),
            done: false,
        };

        let _guard = self.write_lock.lock().await;
        let mut tasks = self.list(client);
        tasks.push(task.clone());
        self.save(client, &tasks)?;
        Ok(task)
    }

    pub async fn toggle(&self, client: &str, id: &str) -> Result<GuestTask, GuestTaskError> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.list(client);
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| GuestTaskError::NotFound(id.to_string()))?;
        task.done = !task.done;
        let toggled = task.clone();
        self.save(client, &tasks)?;
        Ok(toggled)
    }

    pub async fn delete(&self, client: &str, id: &str) -> Result<(), GuestTaskError> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.list(client);
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(GuestTaskError::NotFound(id.to_string()));
        }
        self.save(client, &tasks)
    }

    fn scoped<'a>(&'a self, client: &'a str) -> ScopedStore<'a> {
        ScopedStore::new(self.store.as_ref(), client)
    }

    fn save(&self, client: &str, tasks: &[GuestTask]) -> Result<(), GuestTaskError> {
        save_json(&self.scoped(client), GUEST_TASKS_KEY, &tasks).map_err(|err| {
            tracing::error!(client, error = %err, "failed to save guest tasks");
            GuestTaskError::Store(err.to_string())
        })
    }
}
