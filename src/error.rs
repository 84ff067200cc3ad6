use thiserror::Error;

pub type TransitionResult<T> = Result<T, TransitionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error("invalid progress: {progress} (expected a value in [0, 1])")]
    InvalidProgress { progress: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
