use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unknown timezone code: {0}")]
    UnknownZone(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
