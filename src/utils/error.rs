//! Error handling for the service
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Play Store scraping errors
    #[error("Scrape error: {0}")]
    Scrape(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a scrape error
    pub fn scrape(msg: impl Into<String>) -> Self {
        Self::Scrape(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServiceError::config("missing database url");
        assert_eq!(err.to_string(), "Configuration error: missing database url");

        let err = ServiceError::scrape("play store returned 404");
        assert_eq!(err.to_string(), "Scrape error: play store returned 404");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ServiceError = json_err.into();
        assert!(matches!(err, ServiceError::Serialization(_)));
    }
}
