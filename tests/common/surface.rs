//! Recording stand-ins for the notifier and diagnostic log

use j1939_dl::{DiagnosticLog, Error, Notice, Notifier};
use std::sync::Mutex;

/// Notifier that keeps every notice
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Notices shown so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Diagnostic log that keeps every entry's error code
#[derive(Default)]
pub struct RecordingDiagnostics {
    codes: Mutex<Vec<&'static str>>,
}

impl RecordingDiagnostics {
    /// Error codes recorded so far
    pub fn codes(&self) -> Vec<&'static str> {
        self.codes.lock().unwrap().clone()
    }
}

impl DiagnosticLog for RecordingDiagnostics {
    fn record(&self, error: &Error) {
        self.codes.lock().unwrap().push(error.error_code());
    }
}
