use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    /// The inputs and outputs do not balance, are not authorized, or do not
    /// move locks the way the transaction requires.
    #[error("flow check rejected: {0}")]
    Rejected(String),
}
