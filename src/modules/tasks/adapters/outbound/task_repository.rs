use crate::modules::tasks::core::task::TaskRecord;
use async_trait::async_trait;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: TaskRecord) -> anyhow::Result<()>;

    async fn get(&self, owner: &str, task_id: &str) -> anyhow::Result<Option<TaskRecord>>;

    /// Overwrites an existing task. Returns `false` when it does not exist.
    async fn update(&self, task: TaskRecord) -> anyhow::Result<bool>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, owner: &str, task_id: &str) -> anyhow::Result<bool>;

    /// All tasks of one owner in creation order.
    async fn list_by_owner(&self, owner: &str) -> anyhow::Result<Vec<TaskRecord>>;
}
