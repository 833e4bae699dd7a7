//! Shared test helpers for creating RequestDispatcher instances in tests.

use crate::config::Config;
use crate::dispatcher::RequestDispatcher;
use crate::error::Error;
use crate::surface::{DiagnosticLog, DownloadSink, Notice, Notifier};
use crate::types::DownloadedFile;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Notifier that remembers every notice
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Diagnostic log that remembers every entry
#[derive(Default)]
pub(crate) struct RecordingDiagnostics {
    entries: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

impl DiagnosticLog for RecordingDiagnostics {
    fn record(&self, error: &Error) {
        self.entries.lock().unwrap().push(error.to_string());
    }
}

/// Sink whose disk is always full
pub(crate) struct FailingSink;

#[async_trait]
impl DownloadSink for FailingSink {
    async fn save(&self, filename: &str, _body: Bytes) -> crate::Result<DownloadedFile> {
        Err(Error::Materialize {
            path: PathBuf::from(filename),
            source: std::io::Error::other("no space left on device"),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A dispatcher wired to recording collaborators
pub(crate) struct TestDispatcher {
    pub(crate) dispatcher: RequestDispatcher,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) diagnostics: Arc<RecordingDiagnostics>,
    pub(crate) download_dir: PathBuf,
    /// Keeps the download directory alive
    pub(crate) _temp_dir: TempDir,
}

/// Helper to create a dispatcher pointed at `base_url` that downloads into a
/// fresh temp directory.
pub(crate) fn create_test_dispatcher(base_url: &str) -> TestDispatcher {
    create_test_dispatcher_with(base_url, |_| {})
}

/// Like [`create_test_dispatcher`], with a chance to adjust the config first.
pub(crate) fn create_test_dispatcher_with(
    base_url: &str,
    adjust: impl FnOnce(&mut Config),
) -> TestDispatcher {
    let temp_dir = tempfile::tempdir().unwrap();
    let download_dir = temp_dir.path().join("downloads");

    let mut config = Config::default();
    config.server.base_url = base_url.to_string();
    config.download.download_dir = download_dir.clone();
    adjust(&mut config);

    let notifier = Arc::new(RecordingNotifier::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());

    let dispatcher = RequestDispatcher::new(config)
        .unwrap()
        .with_notifier(notifier.clone())
        .with_diagnostics(diagnostics.clone());

    TestDispatcher {
        dispatcher,
        notifier,
        diagnostics,
        download_dir,
        _temp_dir: temp_dir,
    }
}

/// Base URL of a local port nothing listens on
pub(crate) fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Base URL of a server that answers one request with `200 OK`, promises
/// 100 body bytes, sends 3 and closes the connection
pub(crate) async fn truncated_body_base_url() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request so closing the socket does not reset it early
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 100\r\n\r\nabc",
            )
            .await
            .unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}
