use thiserror::Error;

/// Custom error type for popwatch
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rule '{0}' has no entry in the notifier state")]
    UnknownRule(String),

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule { id: String, reason: String },
}

/// Result type alias for popwatch
pub type Result<T> = std::result::Result<T, WatchError>;

impl WatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WatchError::Config(msg.into())
    }

    pub fn unknown_rule<S: Into<String>>(id: S) -> Self {
        WatchError::UnknownRule(id.into())
    }

    pub fn invalid_rule<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        WatchError::InvalidRule {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
