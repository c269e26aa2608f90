use serde::{Deserialize, Serialize};

pub const GUEST_TASKS_KEY: &str = "studyTogetherTasks";

/// Task kept on this device for someone who is not signed in. No times, no
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestTask {
    pub id: String,
    pub text: String,
    pub done: bool,
}
