use mood_flow::FlowError;
use thiserror::Error;

/// Errors surfaced by the concierge to its presentation layer
#[derive(Debug, Error)]
pub enum ConciergeError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("Tell me how you feel before asking about movies")]
    MoodNotChosen,

    #[error("A mood was already chosen for this conversation; start over to pick another")]
    MoodAlreadyChosen,

    #[error("No movie with id {0}")]
    UnknownMovie(u32),

    #[error("Unknown mood preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ConciergeError {
    /// `true` when the submission was refused because a step is still pending
    pub fn is_busy(&self) -> bool {
        matches!(self, ConciergeError::Flow(FlowError::Busy(_)))
    }
}

pub type Result<T> = std::result::Result<T, ConciergeError>;
