use crate::modules::tasks::core::task::TaskRecord;
use crate::modules::tasks::use_cases::manage_tasks::decision::{DecideError, Decision};
use crate::shared::core::primitives::EpochMillis;
use chrono::NaiveTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub task_id: String,
    pub owner: String,
    pub text: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: EpochMillis,
}

pub fn decide_create(command: CreateTask) -> Decision {
    let text = command.text.trim();
    if text.is_empty() {
        return Decision::Rejected {
            reason: DecideError::EmptyText,
        };
    }

    let start_time = match time_of_day("start_time", command.start_time) {
        Ok(value) => value,
        Err(reason) => return Decision::Rejected { reason },
    };
    let end_time = match time_of_day("end_time", command.end_time) {
        Ok(value) => value,
        Err(reason) => return Decision::Rejected { reason },
    };

    Decision::Accepted {
        task: TaskRecord {
            task_id: command.task_id,
            owner: command.owner,
            text: text.to_string(),
            done: false,
            start_time,
            end_time,
            created_at: Some(command.created_at),
            completed_at: None,
        },
    }
}

// Empty input means "no time". Anything else must be HH:MM.
fn time_of_day(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, DecideError> {
    let Some(raw) = value.map(|raw| raw.trim().to_string()) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map(|time| Some(time.format("%H:%M").to_string()))
        .map_err(|_| DecideError::InvalidTime { field, value: raw })
}
