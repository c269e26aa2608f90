use crate::shared::core::primitives::{EpochMillis, UserId};
use serde::{Deserialize, Serialize};

/// A to-do item owned by one user. `completed_at` is set exactly when
/// `done` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub owner: UserId,
    pub text: String,
    pub done: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: Option<EpochMillis>,
    pub completed_at: Option<EpochMillis>,
}

impl TaskRecord {
    /// Flips completion. Completing stamps `now`, reopening clears the stamp.
    pub fn toggle(mut self, now: EpochMillis) -> Self {
        self.done = !self.done;
        self.completed_at = if self.done { Some(now) } else { None };
        self
    }
}

/// Open tasks first, completed last. Otherwise keeps the incoming order.
pub fn sort_for_display(tasks: &mut [TaskRecord]) {
    tasks.sort_by_key(|task| task.done);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub completed: usize,
    pub remaining: usize,
}

pub fn count(tasks: &[TaskRecord]) -> TaskCounts {
    let completed = tasks.iter().filter(|task| task.done).count();
    TaskCounts {
        completed,
        remaining: tasks.len() - completed,
    }
}
