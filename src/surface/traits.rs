//! Traits and types for the dispatcher's collaborators

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Error;
use crate::types::DownloadedFile;

/// Blocking notifications shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Nothing was checked
    EmptySelection,
    /// Duration rejected under the numeric policy
    InvalidDuration,
    /// The server answered with a non-success status
    GenerationFailed,
    /// Network or processing failure
    ConnectionError,
}

impl Notice {
    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptySelection => "Please select at least one PGN!",
            Notice::InvalidDuration => "Duration must be a whole number of seconds.",
            Notice::GenerationFailed => "Generation failed. Server returned error.",
            Notice::ConnectionError => "An error occurred while connecting to the server.",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Blocking user notification channel
///
/// `alert` returns once the user has been told; the dispatcher calls it
/// synchronously and at most once per run.
pub trait Notifier: Send + Sync {
    /// Show a notice
    fn alert(&self, notice: Notice);
}

/// Diagnostic channel for transport-level failures
///
/// Validation errors and server rejections are never reported here.
pub trait DiagnosticLog: Send + Sync {
    /// Record a transport failure
    fn record(&self, error: &Error);
}

/// Destination for successful responses
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Materialize `body` under `filename`
    ///
    /// # Errors
    ///
    /// Any error is treated by the dispatcher as a failure while processing
    /// the response: it is logged and reported as a connection error.
    async fn save(&self, filename: &str, body: Bytes) -> crate::Result<DownloadedFile>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
