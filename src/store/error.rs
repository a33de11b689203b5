use thiserror::Error;

/// Outcome of a mutating store operation: a human-readable success message,
/// or a failure the presentation layer shows to the user.
pub type OpResult = Result<String, OpError>;

#[derive(Debug, Error)]
pub enum OpError {
    /// Malformed or missing caller input (empty fields, out-of-range numbers).
    #[error("{0}")]
    Invalid(String),
    /// The named user, role, or course does not exist.
    #[error("{0}")]
    NotFound(String),
    /// A document rewrite failed. Not a business outcome; surfaces at the
    /// process boundary.
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl OpError {
    pub fn code(&self) -> &'static str {
        match self {
            OpError::Invalid(_) => "invalid_input",
            OpError::NotFound(_) => "not_found",
            OpError::Io(_) => "io_failed",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> OpError {
        OpError::Invalid(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> OpError {
        OpError::NotFound(message.into())
    }
}
