use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
///
/// "No matching records" is never represented here: empty input produces
/// zeroed summaries, not errors.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Argument of the wrong type or shape (malformed id, inverted date range,
    /// undeserializable record)
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// Commission rule table is invalid; carries every violation found
    #[error("Rule set violation: {}", .0.join("; "))]
    RuleSetViolation(Vec<String>),

    /// Drill-down transition not allowed from the current level
    #[error("Invalid transition: cannot {action} from {from} level")]
    InvalidTransition { from: String, action: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn input_shape(msg: impl Into<String>) -> Self {
        AppError::InputShape(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn invalid_transition(from: impl fmt::Display, action: impl Into<String>) -> Self {
        AppError::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    /// Whether the error indicates a caller bug rather than a data condition
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            AppError::InputShape(_) | AppError::InvalidTransition { .. }
        )
    }
}
