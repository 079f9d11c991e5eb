//! Error types for the Contextifyer text-linking service
//!
//! This module provides comprehensive error handling using thiserror for
//! structured error definitions and anyhow for error propagation.
//!
//! The matching core (normalization, similarity, matching, transformation)
//! never produces these errors: every failure there degrades to "no match".
//! They arise only at the edges: loading labels, building an index under a
//! strict duplicate policy, reading configuration, and file or network I/O.

use thiserror::Error;

/// Main error type for Contextifyer operations
#[derive(Error, Debug)]
pub enum ContextifyerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The label source answered, but not with something usable
    #[error("Ontology source error: {0}")]
    Ontology(String),

    /// Two labels normalized to the same text under the `reject` policy
    #[error("Duplicate label '{label}': already mapped to {existing}, refusing {rejected}")]
    DuplicateLabel {
        label: String,
        existing: String,
        rejected: String,
    },

    /// Input validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Contextifyer operations
pub type Result<T> = std::result::Result<T, ContextifyerError>;

/// Convert anyhow::Error to ContextifyerError
impl From<anyhow::Error> for ContextifyerError {
    fn from(err: anyhow::Error) -> Self {
        ContextifyerError::Other(err.to_string())
    }
}
