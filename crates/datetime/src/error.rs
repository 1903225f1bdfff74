//! Error types for pattern parsing and preference storage.

/// Error type for preference store operations.
pub type Result<T> = std::result::Result<T, PreferenceError>;

/// Unrecognized display pattern token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Not one of the date pattern tokens
    #[error("unknown date pattern: {0:?}")]
    UnknownDate(String),

    /// Not one of the time pattern tokens
    #[error("unknown time pattern: {0:?}")]
    UnknownTime(String),
}

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store could not be reached
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}
