use crate::modules::tasks::core::task::TaskRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("task text must not be empty")]
    EmptyText,

    #[error("{field} must be a time of day as HH:MM, got {value:?}")]
    InvalidTime { field: &'static str, value: String },
}

#[derive(Debug)]
pub enum Decision {
    Accepted { task: TaskRecord },
    Rejected { reason: DecideError },
}
