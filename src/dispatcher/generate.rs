//! The generate operation.

use super::RequestDispatcher;
use crate::config::DurationPolicy;
use crate::error::{Error, Result, ValidationError};
use crate::form::FormSnapshot;
use crate::surface::Notice;
use crate::types::{DownloadedFile, Event, Format, GenerationRequest, GenerationResult};
use crate::utils::{download_filename, filename_from_content_disposition};

/// How the server answered a submitted request
enum Reply {
    /// 2xx with its body
    Accepted(GenerationResult),
    /// Any other status; the body is not read
    Rejected(reqwest::StatusCode),
}

impl RequestDispatcher {
    /// Submit the current form and save the generated file
    ///
    /// Reads the form, checks it, holds the trigger control in flight for
    /// the duration of the exchange and reports the outcome through the
    /// notifier:
    ///
    /// - empty selection (or a non-numeric duration under
    ///   [`DurationPolicy::Numeric`]): one notice, no request
    /// - 2xx: the body is handed to the download sink, no notice
    /// - other status: one "generation failed" notice, nothing saved
    /// - network failure, unreadable body or failing sink: one diagnostic
    ///   entry and one "connection error" notice
    ///
    /// The control returns to idle with its original label on every path,
    /// and only after the exchange has settled. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the error behind whichever notice was shown, or
    /// [`Error::AlreadyInFlight`] (without a notice) if another run holds the
    /// control.
    pub async fn generate(&self) -> Result<DownloadedFile> {
        if !self.control.is_idle() {
            return Err(Error::AlreadyInFlight);
        }

        let snapshot = self.form.snapshot();
        if let Err((error, notice)) = self.check(&snapshot) {
            tracing::debug!(reason = %error, "generation request not sent");
            self.surface.notifier.alert(notice);
            self.emit(Event::Invalid {
                reason: error.to_string(),
            });
            return Err(error.into());
        }

        let Some(_busy) = self.control.begin() else {
            return Err(Error::AlreadyInFlight);
        };

        let FormSnapshot {
            pgns,
            format,
            duration,
        } = snapshot;
        let request = GenerationRequest {
            pgns,
            format,
            duration,
        };

        tracing::info!(
            endpoint = %self.endpoint,
            pgns = request.pgns.len(),
            format = %request.format,
            duration = %request.duration,
            "submitting generation request"
        );
        self.emit(Event::Submitted {
            pgns: request.pgns.iter().map(ToString::to_string).collect(),
            format: request.format,
            duration: request.duration.to_string(),
        });

        match self.submit(&request).await {
            Ok(Reply::Accepted(result)) => match self.materialize(request.format, result).await {
                Ok(file) => {
                    tracing::info!(
                        path = %file.path.display(),
                        bytes = file.bytes,
                        "dataset downloaded"
                    );
                    self.emit(Event::Downloaded {
                        path: file.path.clone(),
                        bytes: file.bytes,
                    });
                    Ok(file)
                }
                Err(e) => Err(self.transport_failure(e)),
            },
            Ok(Reply::Rejected(status)) => {
                tracing::debug!(status = status.as_u16(), "generation server rejected request");
                self.surface.notifier.alert(Notice::GenerationFailed);
                self.emit(Event::Rejected {
                    status: status.as_u16(),
                });
                Err(Error::ServerRejected {
                    status: status.as_u16(),
                })
            }
            Err(e) => Err(self.transport_failure(e)),
        }
    }

    /// Local checks; the notice to show on failure travels with the error
    fn check(&self, snapshot: &FormSnapshot) -> std::result::Result<(), (ValidationError, Notice)> {
        if snapshot.pgns.is_empty() {
            return Err((ValidationError::EmptySelection, Notice::EmptySelection));
        }
        if self.config.form.duration_policy == DurationPolicy::Numeric
            && snapshot.duration.as_seconds().is_none()
        {
            return Err((
                ValidationError::InvalidDuration {
                    value: snapshot.duration.to_string(),
                },
                Notice::InvalidDuration,
            ));
        }
        Ok(())
    }

    /// POST the request and wait for the complete reply
    async fn submit(&self, request: &GenerationRequest) -> Result<Reply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Reply::Rejected(status));
        }

        let headers = response.headers();
        let server_filename = headers
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition);
        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await?;

        Ok(Reply::Accepted(GenerationResult {
            body,
            server_filename,
            content_type,
        }))
    }

    /// Hand a successful body to the download sink
    async fn materialize(&self, format: Format, result: GenerationResult) -> Result<DownloadedFile> {
        let filename = match result.server_filename {
            Some(name) if self.config.download.use_server_filename => name,
            _ => download_filename(&self.config.download.filename_stem, format),
        };

        tracing::debug!(
            filename = %filename,
            sink = self.surface.sink.name(),
            content_type = result.content_type.as_deref().unwrap_or("unknown"),
            bytes = result.body.len(),
            "materializing download"
        );

        self.surface.sink.save(&filename, result.body).await
    }

    /// Log, notify and pass the error back
    fn transport_failure(&self, error: Error) -> Error {
        self.surface.diagnostics.record(&error);
        self.surface.notifier.alert(Notice::ConnectionError);
        self.emit(Event::TransportFailed {
            error: error.to_string(),
        });
        error
    }
}
