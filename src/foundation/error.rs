/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced at the crate boundary (document parsing, config, session requests).
///
/// Timeline allocation, asset resolution, sequencing and per-frame evaluation never fail; they
/// degrade to "absent" instead.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid input or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while evaluating a session request.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure while (de)serializing a document.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
