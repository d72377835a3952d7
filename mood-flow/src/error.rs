use thiserror::Error;

/// Errors raised by the session runtime
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Task execution failed: {0}")]
    TaskExecutionFailed(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Context error: {0}")]
    ContextError(String),

    /// A step is still pending for this session; the submission was not accepted
    #[error("Session {0} is busy with a pending step")]
    Busy(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
