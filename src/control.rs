//! Trigger control and busy indicator
//!
//! The control moves Idle -> InFlight when a generation run starts and back
//! to Idle when the run's [`BusyGuard`] is dropped, so every exit path of the
//! run (success, rejection, transport failure, panic) restores the original
//! label and re-enables the control.

use serde::Serialize;
use tokio::sync::watch;

/// Label shown while the control is idle
pub const IDLE_LABEL: &str = "🚀 Generate & Download";

/// Label shown while a request is in flight
pub const BUSY_LABEL: &str = "Generating...";

/// Phase of the trigger control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPhase {
    /// Ready to start a run
    Idle,
    /// A run holds the control
    InFlight,
}

/// Observable state of the trigger control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// Current phase
    pub phase: ControlPhase,
    /// Visible label
    pub label: String,
    /// Whether the control accepts clicks
    pub enabled: bool,
}

/// The generate button
#[derive(Debug)]
pub struct TriggerControl {
    idle_label: String,
    state: watch::Sender<ControlState>,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self::with_label(IDLE_LABEL)
    }
}

impl TriggerControl {
    /// Create an idle control with the standard label
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle control with a custom label
    pub fn with_label(label: impl Into<String>) -> Self {
        let idle_label = label.into();
        let (state, _rx) = watch::channel(ControlState {
            phase: ControlPhase::Idle,
            label: idle_label.clone(),
            enabled: true,
        });
        Self { idle_label, state }
    }

    /// Current state
    pub fn state(&self) -> ControlState {
        self.state.borrow().clone()
    }

    /// Whether no run holds the control
    pub fn is_idle(&self) -> bool {
        self.state.borrow().phase == ControlPhase::Idle
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ControlState> {
        self.state.subscribe()
    }

    /// Move Idle -> InFlight
    ///
    /// Returns `None` if a run already holds the control.
    pub fn begin(&self) -> Option<BusyGuard<'_>> {
        let acquired = self.state.send_if_modified(|state| {
            if state.phase != ControlPhase::Idle {
                return false;
            }
            state.phase = ControlPhase::InFlight;
            state.label = BUSY_LABEL.to_string();
            state.enabled = false;
            true
        });
        // Only build a guard when acquired: dropping one releases the holder.
        if acquired {
            Some(BusyGuard { control: self })
        } else {
            None
        }
    }

    fn finish(&self) {
        self.state.send_modify(|state| {
            state.phase = ControlPhase::Idle;
            state.label = self.idle_label.clone();
            state.enabled = true;
        });
    }
}

/// Holds the control in flight until dropped
#[must_use = "the control returns to idle as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard<'a> {
    control: &'a TriggerControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.finish();
    }
}
