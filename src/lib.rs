//! # j1939-dl
//!
//! Client library for J1939 dataset generation servers.
//!
//! A generation run reads the current form (checked PGNs, output format,
//! duration), POSTs it as JSON to the server's `/generate` endpoint and saves
//! the returned file as `j1939_dataset.<format>`. The generator itself is an
//! external service; this crate only speaks its request/response contract.
//!
//! ## Design Philosophy
//!
//! - **One round trip per click** - no retries, no queue, no cancellation
//! - **Guaranteed release** - the trigger control returns to idle on every
//!   exit path through an RAII guard
//! - **Pluggable surface** - notifications, diagnostics and the download
//!   destination are traits; terminal and filesystem versions ship in
//!   [`surface`]
//! - **Event-driven** - consumers can subscribe to run events
//!
//! ## Quick Start
//!
//! ```no_run
//! use j1939_dl::{Config, Format, RequestDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.server.base_url = "http://127.0.0.1:3000".to_string();
//!     config.download.download_dir = "downloads".into();
//!
//!     let dispatcher = RequestDispatcher::new(config)?;
//!
//!     let form = dispatcher.form();
//!     form.check_str("61444")?;
//!     form.check_str("65262")?;
//!     form.set_format(Format::Csv);
//!     form.set_duration("60");
//!
//!     let file = dispatcher.generate().await?;
//!     println!("saved {} bytes to {}", file.bytes, file.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Selectable PGNs
pub mod catalog;
/// Configuration types
pub mod config;
/// Trigger control and busy guard
pub mod control;
/// Request dispatcher (the generate operation)
pub mod dispatcher;
/// Error types
pub mod error;
/// Form state
pub mod form;
/// Notifier, diagnostics and download sink
pub mod surface;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, DurationPolicy, FileCollisionAction};
pub use control::{ControlPhase, ControlState, TriggerControl};
pub use dispatcher::RequestDispatcher;
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use form::{FormSnapshot, FormState};
pub use surface::{DiagnosticLog, DownloadSink, Notice, Notifier};
pub use types::{
    DatasetDuration, DownloadedFile, Event, Format, GenerationRequest, GenerationResult, PgnId,
    SelectionSet,
};
