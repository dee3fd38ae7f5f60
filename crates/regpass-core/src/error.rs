//! Error types for RegPass

/// Result type alias using RegPass's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for RegPass operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// User-supplied text could not be coerced into the expected value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Policy loading or validation errors
    #[error("policy error: {0}")]
    Policy(String),

    /// In-process filter construction errors
    #[error("filter error: {0}")]
    Filter(String),

    /// Console and file IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new policy error
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    /// Create a new filter error
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::Filter(msg.into())
    }

    /// Whether this error came from coercing user input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
