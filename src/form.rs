//! Form state read by the dispatcher on every invocation
//!
//! Mirrors the controls of a generation page: PGN checkboxes, a format
//! selector and a duration input. A front end mutates it through a shared
//! handle; [`FormState::snapshot`] is what a generation run actually sends.

use crate::config::FormDefaults;
use crate::error::ValidationError;
use crate::types::{DatasetDuration, Format, PgnId, SelectionSet};
use std::sync::{Mutex, MutexGuard};

/// Copy of the form taken at the start of a generation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Checked PGN identifiers
    pub pgns: SelectionSet,
    /// Selected format
    pub format: Format,
    /// Duration input
    pub duration: DatasetDuration,
}

#[derive(Debug, Default)]
struct FormInner {
    pgns: SelectionSet,
    format: Format,
    duration: DatasetDuration,
}

/// Shared, interior-mutable form state
#[derive(Debug, Default)]
pub struct FormState {
    inner: Mutex<FormInner>,
}

impl FormState {
    /// Create a form with nothing checked and default format/duration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form from configured defaults
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        Self {
            inner: Mutex::new(FormInner {
                pgns: SelectionSet::new(),
                format: defaults.format,
                duration: defaults.duration.clone(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        // Every critical section leaves the form consistent, so a poisoned
        // lock still holds usable state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Check a PGN box; returns false if it was already checked
    pub fn check(&self, pgn: PgnId) -> bool {
        self.lock().pgns.insert(pgn)
    }

    /// Check a PGN box from raw input
    pub fn check_str(&self, pgn: &str) -> Result<bool, ValidationError> {
        Ok(self.check(PgnId::new(pgn)?))
    }

    /// Uncheck a PGN box; returns false if it was not checked
    pub fn uncheck(&self, pgn: &PgnId) -> bool {
        self.lock().pgns.remove(pgn)
    }

    /// Uncheck everything
    pub fn clear_selection(&self) {
        self.lock().pgns.clear();
    }

    /// Select an output format
    pub fn set_format(&self, format: Format) {
        self.lock().format = format;
    }

    /// Set the duration input
    pub fn set_duration(&self, duration: impl Into<DatasetDuration>) {
        self.lock().duration = duration.into();
    }

    /// Copy the current values
    pub fn snapshot(&self) -> FormSnapshot {
        let inner = self.lock();
        FormSnapshot {
            pgns: inner.pgns.clone(),
            format: inner.format,
            duration: inner.duration.clone(),
        }
    }
}
