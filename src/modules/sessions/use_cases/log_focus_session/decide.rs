use crate::modules::sessions::core::session::SessionRecord;
use crate::modules::sessions::use_cases::log_focus_session::decision::{DecideError, Decision};
use crate::shared::core::primitives::EpochMillis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFocusSession {
    pub session_id: String,
    pub owner: String,
    pub minutes: u32,
    pub completed_at: EpochMillis,
}

pub fn decide_log_session(command: LogFocusSession) -> Decision {
    if command.minutes == 0 {
        return Decision::Rejected {
            reason: DecideError::InvalidDuration,
        };
    }
    Decision::Accepted {
        record: SessionRecord {
            session_id: command.session_id,
            owner: command.owner,
            minutes: command.minutes,
            created_at: Some(command.completed_at),
        },
    }
}

#[cfg(test)]
mod log_focus_session_decide_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn command() -> LogFocusSession {
        LogFocusSession {
            session_id: "s-0001".into(),
            owner: "user-fixed-0001".into(),
            minutes: 25,
            completed_at: 1_700_000_000_000,
        }
    }

    #[rstest]
    fn it_should_accept_a_positive_duration(command: LogFocusSession) {
        match decide_log_session(command) {
            Decision::Accepted { record } => {
                assert_eq!(record.minutes, 25);
                assert_eq!(record.owner, "user-fixed-0001");
                assert_eq!(record.created_at, Some(1_700_000_000_000));
            }
            Decision::Rejected { .. } => panic!("expected Accepted"),
        }
    }

    #[rstest]
    fn it_should_reject_zero_minutes(mut command: LogFocusSession) {
        command.minutes = 0;
        assert!(matches!(
            decide_log_session(command),
            Decision::Rejected {
                reason: DecideError::InvalidDuration
            }
        ));
    }
}
