use crate::modules::sessions::core::session::SessionRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("a focus session must last at least one minute")]
    InvalidDuration,
}

#[derive(Debug)]
pub enum Decision {
    Accepted { record: SessionRecord },
    Rejected { reason: DecideError },
}
