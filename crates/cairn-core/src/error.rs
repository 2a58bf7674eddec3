use thiserror::Error;

pub type Result<T> = std::result::Result<T, CairnError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CairnError {
    #[error("Parse error at {position}: {message}")]
    Parse { message: String, position: usize },
    /// The evaluation step budget ran out before a fixed point was reached.
    #[error("Evaluation aborted after {steps} steps")]
    EvaluationAborted { steps: usize },
    /// A collaborator broke its contract; this is a programming error.
    #[error("Contract violation: {0}")]
    Contract(String),
}
