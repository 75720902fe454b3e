//! Error types for the anamnesis admin client
//!
//! All errors use thiserror for structured error handling.
//! They serialize to their display string, which is what the error
//! dialog shows to the user.

use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Anamnesis form not found: {0}")]
    FormNotFound(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_bare_message() {
        let err = AppError::from(ValidationError::MissingTitle);
        assert_eq!(err.to_string(), "Form title is required.");
    }

    #[test]
    fn test_serializes_as_display_string() {
        let err = AppError::FormNotFound(7);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Anamnesis form not found: 7\"");
    }
}
