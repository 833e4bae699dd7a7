//! Collaborators the request dispatcher reports to
//!
//! A generation run touches three things outside itself: the user (blocking
//! notifications), a diagnostic log (transport failures only) and the place
//! downloads end up. Each is a trait so a terminal, a GUI or a test double
//! can stand in:
//!
//! - [`Notifier`]: blocking user notifications, see [`Notice`]
//! - [`DiagnosticLog`]: one entry per transport failure
//! - [`DownloadSink`]: materializes a successful response
//!
//! Stock implementations:
//!
//! - [`TerminalNotifier`]: prints notices to stderr
//! - [`TracingDiagnostics`]: forwards diagnostics to `tracing::error!`
//! - [`FsDownloadSink`]: writes downloads into a directory
//!
//! ## Usage
//!
//! ```no_run
//! use j1939_dl::config::FileCollisionAction;
//! use j1939_dl::surface::{DownloadSink, FsDownloadSink};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = FsDownloadSink::new("downloads", FileCollisionAction::Rename);
//!     let saved = sink.save("j1939_dataset.csv", "time_ms\n0\n".into()).await?;
//!     println!("saved {} bytes to {}", saved.bytes, saved.path.display());
//!     Ok(())
//! }
//! ```

mod fs_sink;
mod terminal;
mod traits;

pub use fs_sink::FsDownloadSink;
pub use terminal::{TerminalNotifier, TracingDiagnostics};
pub use traits::{DiagnosticLog, DownloadSink, Notice, Notifier};
