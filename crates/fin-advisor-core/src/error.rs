use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AdvisorError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AdvisorError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(e: serde_json::Error) -> Self {
        AdvisorError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for AdvisorError {
    fn from(e: serde_yaml::Error) -> Self {
        AdvisorError::SerializationError(e.to_string())
    }
}
