use crate::modules::tasks::adapters::outbound::task_repository::TaskRepository;
use crate::modules::tasks::core::task::TaskRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTaskRepository {
    // owner -> tasks in creation order
    tasks: RwLock<HashMap<String, Vec<TaskRecord>>>,
    is_offline: bool,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Task repository offline"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: TaskRecord) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.tasks
            .write()
            .await
            .entry(task.owner.clone())
            .or_default()
            .push(task);
        Ok(())
    }

    async fn get(&self, owner: &str, task_id: &str) -> anyhow::Result<Option<TaskRecord>> {
        self.ensure_online()?;
        Ok(self
            .tasks
            .read()
            .await
            .get(owner)
            .and_then(|tasks| tasks.iter().find(|task| task.task_id == task_id))
            .cloned())
    }

    async fn update(&self, task: TaskRecord) -> anyhow::Result<bool> {
        self.ensure_online()?;
        let mut guard = self.tasks.write().await;
        let Some(slot) = guard
            .get_mut(&task.owner)
            .and_then(|tasks| tasks.iter_mut().find(|current| current.task_id == task.task_id))
        else {
            return Ok(false);
        };
        *slot = task;
        Ok(true)
    }

    async fn delete(&self, owner: &str, task_id: &str) -> anyhow::Result<bool> {
        self.ensure_online()?;
        let mut guard = self.tasks.write().await;
        let Some(tasks) = guard.get_mut(owner) else {
            return Ok(false);
        };
        let before = tasks.len();
        tasks.retain(|task| task.task_id != task_id);
        Ok(tasks.len() != before)
    }

    async fn list_by_owner(&self, owner: &str) -> anyhow::Result<Vec<TaskRecord>> {
        self.ensure_online()?;
        Ok(self
            .tasks
            .read()
            .await
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }
}
