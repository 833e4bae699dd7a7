//! Terminal notifier and tracing-backed diagnostics

use super::traits::{DiagnosticLog, Notice, Notifier};
use crate::error::Error;
use std::io::Write;

/// Prints notices to stderr
///
/// Blocking in the sense that matters for a terminal: the line is written
/// and flushed before `alert` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, notice: Notice) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr is gone.
        let _ = writeln!(stderr, "⚠ {}", notice);
        let _ = stderr.flush();
    }
}

/// Forwards transport failures to `tracing::error!`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticLog for TracingDiagnostics {
    fn record(&self, error: &Error) {
        tracing::error!(error = %error, code = error.error_code(), "generation request failed");
    }
}
