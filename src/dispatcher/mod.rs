//! Request dispatcher: one generation round trip per invocation.
//!
//! The `RequestDispatcher` struct and its methods are split by concern:
//! - [`generate`] - the generate operation (validate, submit, materialize)
//!
//! Construction wires the dispatcher to its collaborators. Everything is
//! `Arc`-wrapped so the dispatcher is cheap to clone and can be shared with
//! spawned tasks.

mod generate;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::control::TriggerControl;
use crate::error::Result;
use crate::form::FormState;
use crate::surface::{
    DiagnosticLog, DownloadSink, FsDownloadSink, Notifier, TerminalNotifier, TracingDiagnostics,
};
use crate::types::Event;
use std::sync::Arc;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Collaborators a dispatcher reports to
#[derive(Clone)]
pub(crate) struct Surface {
    /// Blocking user notifications
    pub(crate) notifier: Arc<dyn Notifier>,
    /// Diagnostic channel for transport failures
    pub(crate) diagnostics: Arc<dyn DiagnosticLog>,
    /// Where successful responses are written
    pub(crate) sink: Arc<dyn DownloadSink>,
}

/// Submits the current form to the generation server and saves the result
/// (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct RequestDispatcher {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Resolved generation endpoint
    pub(crate) endpoint: url::Url,
    /// HTTP client (no request timeout)
    pub(crate) client: reqwest::Client,
    /// Form state read at the start of every run
    pub(crate) form: Arc<FormState>,
    /// Trigger control guarding against overlapping runs
    pub(crate) control: Arc<TriggerControl>,
    /// Notifier, diagnostics and download sink
    pub(crate) surface: Surface,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl RequestDispatcher {
    /// Create a dispatcher with the stock collaborators
    ///
    /// Notices go to stderr, diagnostics to `tracing`, downloads to
    /// `config.download.download_dir`. The form starts from `config.form`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let endpoint = config.server.endpoint()?;
        let client = reqwest::Client::builder().build()?;

        let sink = FsDownloadSink::new(
            config.download.download_dir.clone(),
            config.download.file_collision,
        );
        let form = FormState::from_defaults(&config.form);
        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        tracing::debug!(endpoint = %endpoint, "request dispatcher ready");

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            client,
            form: Arc::new(form),
            control: Arc::new(TriggerControl::new()),
            surface: Surface {
                notifier: Arc::new(TerminalNotifier),
                diagnostics: Arc::new(TracingDiagnostics),
                sink: Arc::new(sink),
            },
            event_tx,
        })
    }

    /// Replace the notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.surface.notifier = notifier;
        self
    }

    /// Replace the diagnostic log
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticLog>) -> Self {
        self.surface.diagnostics = diagnostics;
        self
    }

    /// Replace the download sink
    pub fn with_sink(mut self, sink: Arc<dyn DownloadSink>) -> Self {
        self.surface.sink = sink;
        self
    }

    /// Share an existing form with this dispatcher
    pub fn with_form(mut self, form: Arc<FormState>) -> Self {
        self.form = form;
        self
    }

    /// Share an existing trigger control with this dispatcher
    pub fn with_control(mut self, control: Arc<TriggerControl>) -> Self {
        self.control = control;
        self
    }

    /// Form state the next run will read
    pub fn form(&self) -> &Arc<FormState> {
        &self.form
    }

    /// Trigger control and busy indicator
    pub fn control(&self) -> &Arc<TriggerControl> {
        &self.control
    }

    /// Resolved generation endpoint
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Configuration this dispatcher was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to dispatcher events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is fine.
        self.event_tx.send(event).ok();
    }
}
