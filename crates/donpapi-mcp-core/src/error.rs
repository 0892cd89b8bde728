use thiserror::Error;

/// Core error types for adapter operations
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl AdapterError {
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl ToString) -> Self {
        AdapterError::InvalidArguments {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error was caused by the caller rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(self, AdapterError::InvalidArguments { .. })
    }
}
