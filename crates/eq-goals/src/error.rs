// error.rs — Error types for the goal tracker.

use thiserror::Error;

/// Errors that can occur while building, recording, or persisting goals.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A goal was constructed with a value it cannot hold.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A line of a goal file could not be decoded.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// No goal exists at the requested position.
    #[error("no goal at position {0}")]
    NotFound(usize),

    /// The config file exists but could not be used.
    #[error("invalid config at {path}: {reason}")]
    Config { path: String, reason: String },

    /// Failed to serialize an event.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    Notification(String),
}

impl GoalError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        GoalError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
