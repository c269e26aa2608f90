use crate::modules::tasks::core::task::TaskRecord;
use crate::shared::core::primitives::EpochMillis;

pub struct TaskBuilder {
    inner: TaskRecord,
}

#[allow(dead_code)]
impl TaskBuilder {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            inner: TaskRecord {
                task_id: task_id.into(),
                owner: "user-fixed-0001".to_string(),
                text: "Solve 3 DSA questions".to_string(),
                done: false,
                start_time: None,
                end_time: None,
                created_at: Some(1_700_000_000_000),
                completed_at: None,
            },
        }
    }

    pub fn owner(mut self, v: impl Into<String>) -> Self {
        self.inner.owner = v.into();
        self
    }

    pub fn text(mut self, v: impl Into<String>) -> Self {
        self.inner.text = v.into();
        self
    }

    pub fn done_at(mut self, at: EpochMillis) -> Self {
        self.inner.done = true;
        self.inner.completed_at = Some(at);
        self
    }

    pub fn build(self) -> TaskRecord {
        self.inner
    }
}
