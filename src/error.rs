//! Error types for j1939-dl
//!
//! Every failure of a generation round trip lands in one of three buckets:
//! - validation errors, detected locally before any network activity
//! - server rejections (non-2xx responses)
//! - transport errors, which also cover failures while reading the body or
//!   writing the downloaded file
//!
//! [`Error::kind`] exposes that classification so front ends can pick exit
//! codes or styles without matching every variant.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for j1939-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for j1939-dl
#[derive(Debug, Error)]
pub enum Error {
    /// The form state failed a local check; no request was sent
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The generation server answered with a non-success status
    #[error("generation server rejected the request with status {status}")]
    ServerRejected {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Network error while talking to the generation server
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be written to its destination
    #[error("failed to save {path}: {source}")]
    Materialize {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "server.base_url")
        key: Option<String>,
    },

    /// Destination file exists and the collision action is `Skip`
    #[error("file already exists: {path}")]
    FileCollision {
        /// The path that already exists
        path: PathBuf,
    },

    /// A destination path could not be derived
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// A generation request from this control is still in flight
    #[error("a generation request is already in flight")]
    AlreadyInFlight,
}

/// Local validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No PGN was checked
    #[error("no PGN selected")]
    EmptySelection,

    /// A blank identifier was checked
    #[error("PGN identifier must not be blank")]
    BlankPgn,

    /// Duration is not a positive whole number of seconds
    #[error("duration {value:?} is not a positive whole number of seconds")]
    InvalidDuration {
        /// The duration as entered
        value: String,
    },

    /// The format is not one the generation server renders
    #[error("unknown format {value:?} (expected csv, trc or txt)")]
    UnknownFormat {
        /// The format as entered
        value: String,
    },
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any network activity
    Validation,
    /// Non-2xx answer from the generation server
    ServerRejection,
    /// Network failure or failure while processing the response
    Transport,
    /// The trigger control was already in flight
    Busy,
    /// Local failure outside a round trip (configuration, I/O, serialization)
    Local,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::ServerRejected { .. } => ErrorKind::ServerRejection,
            Error::Transport(_)
            | Error::Materialize { .. }
            | Error::FileCollision { .. }
            | Error::InvalidPath { .. } => ErrorKind::Transport,
            Error::AlreadyInFlight => ErrorKind::Busy,
            Error::Config { .. } | Error::Io(_) | Error::Serialization(_) => ErrorKind::Local,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(ValidationError::EmptySelection) => "empty_selection",
            Error::Validation(ValidationError::BlankPgn) => "blank_pgn",
            Error::Validation(ValidationError::InvalidDuration { .. }) => "invalid_duration",
            Error::Validation(ValidationError::UnknownFormat { .. }) => "unknown_format",
            Error::ServerRejected { .. } => "server_rejected",
            Error::Transport(_) => "transport_error",
            Error::Materialize { .. } => "materialize_failed",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::Config { .. } => "config_error",
            Error::FileCollision { .. } => "file_collision",
            Error::InvalidPath { .. } => "invalid_path",
            Error::AlreadyInFlight => "already_in_flight",
        }
    }

    /// Shorthand for a [`Error::Config`] tied to a key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
