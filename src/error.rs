use thiserror::Error;

pub type Result<T, E = ShowcaseError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum ShowcaseError {
    #[error("a presentation needs at least one slide")]
    EmptySequence,
    #[error("slide id must not be blank (position {0})")]
    BlankSlideId(usize),
    #[error("duplicate slide id `{id}` at positions {first} and {second}")]
    DuplicateSlideId { id: String, first: usize, second: usize },
    #[error("cool-down must be longer than zero")]
    ZeroCoolDown,
    #[error("wheel threshold must be a finite, non-negative number (got {0})")]
    InvalidWheelThreshold(f32),
}

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: timestamp {at_ms} ms is earlier than the previous event ({previous_ms} ms)")]
    OutOfOrder { line: usize, at_ms: u64, previous_ms: u64 },
    #[error(transparent)]
    Setup(#[from] ShowcaseError),
}

impl ReplayError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
