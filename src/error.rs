//! Error handling for TopicVis-RS
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. Classification of unknown requester or
//! advertiser tags is never an error; see [`crate::internals::grouping`].

use thiserror::Error;

/// Main error type for TopicVis-RS operations
#[derive(Error, Debug)]
pub enum TopicVisError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to reading or validating a player snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TopicVisError>,
    },
}

impl TopicVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TopicVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for TopicVisError {
    fn from(err: serde_json::Error) -> Self {
        TopicVisError::Serialization(err.to_string())
    }
}

/// Result type alias for TopicVis-RS operations
pub type Result<T> = std::result::Result<T, TopicVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
