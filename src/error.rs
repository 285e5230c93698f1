/// Result type for calls against the house points service
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to the user. Every variant carries a displayable message
/// and all of them are recoverable by retrying the same action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Signup input was malformed or rejected
    #[error("{0}")]
    Validation(String),

    /// Admin bootstrap failed
    #[error("{0}")]
    Setup(String),

    /// Quiz submission was rejected
    #[error("{0}")]
    Submission(String),

    /// Dashboard or overview could not be loaded
    #[error("{0}")]
    Fetch(String),

    /// No response was received
    #[error("{0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(msg)
            | ClientError::Setup(msg)
            | ClientError::Submission(msg)
            | ClientError::Fetch(msg)
            | ClientError::Network(msg)
            | ClientError::Config(msg) => msg,
        }
    }
}
