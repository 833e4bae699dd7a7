//! End-to-end generation runs through the public API

mod common;

use common::*;
use j1939_dl::{
    Config, ControlPhase, Event, FileCollisionAction, Format, Notice, RequestDispatcher,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher_for(
    server: &MockServer,
    download_dir: &std::path::Path,
) -> (RequestDispatcher, Arc<RecordingNotifier>, Arc<RecordingDiagnostics>) {
    let mut config = Config::default();
    config.server.base_url = server.uri();
    config.download.download_dir = download_dir.to_path_buf();

    let notifier = Arc::new(RecordingNotifier::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let dispatcher = RequestDispatcher::new(config)
        .unwrap()
        .with_notifier(notifier.clone())
        .with_diagnostics(diagnostics.clone());
    (dispatcher, notifier, diagnostics)
}

#[tokio::test]
async fn engine_temperature_csv_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "pgns": ["61444", "65262"],
            "format": "csv",
            "duration": "60"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/csv")
                .set_body_string(CSV_DATASET),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let (dispatcher, notifier, diagnostics) = dispatcher_for(&server, temp_dir.path());
    let mut events = dispatcher.subscribe();

    let form = dispatcher.form();
    form.check_str("61444").unwrap();
    form.check_str("65262").unwrap();
    form.set_format(Format::Csv);
    form.set_duration("60");

    let file = dispatcher.generate().await.unwrap();

    assert_eq!(file.path, temp_dir.path().join("j1939_dataset.csv"));
    assert_eq!(std::fs::read_to_string(&file.path).unwrap(), CSV_DATASET);
    assert!(notifier.notices().is_empty());
    assert!(diagnostics.codes().is_empty());
    assert_eq!(dispatcher.control().state().phase, ControlPhase::Idle);

    assert!(matches!(events.recv().await.unwrap(), Event::Submitted { .. }));
    assert!(matches!(events.recv().await.unwrap(), Event::Downloaded { .. }));
}

#[tokio::test]
async fn trace_download_keeps_earlier_files() {
    let server = start_generation_server(200, TRC_DATASET.as_bytes()).await;
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("j1939_dataset.trc"), "previous run").unwrap();

    let (dispatcher, _notifier, _diagnostics) = dispatcher_for(&server, temp_dir.path());
    dispatcher.form().check_str("61444").unwrap();
    dispatcher.form().set_format(Format::Trc);

    let file = dispatcher.generate().await.unwrap();

    assert_eq!(file.path, temp_dir.path().join("j1939_dataset (1).trc"));
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("j1939_dataset.trc")).unwrap(),
        "previous run"
    );
}

#[tokio::test]
async fn skip_collision_reports_connection_error() {
    let server = start_generation_server(200, CSV_DATASET.as_bytes()).await;
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("j1939_dataset.csv"), "keep me").unwrap();

    let mut config = Config::default();
    config.server.base_url = server.uri();
    config.download.download_dir = temp_dir.path().to_path_buf();
    config.download.file_collision = FileCollisionAction::Skip;

    let notifier = Arc::new(RecordingNotifier::default());
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let dispatcher = RequestDispatcher::new(config)
        .unwrap()
        .with_notifier(notifier.clone())
        .with_diagnostics(diagnostics.clone());
    dispatcher.form().check_str("65262").unwrap();

    assert!(dispatcher.generate().await.is_err());
    assert_eq!(notifier.notices(), vec![Notice::ConnectionError]);
    assert_eq!(diagnostics.codes(), vec!["file_collision"]);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("j1939_dataset.csv")).unwrap(),
        "keep me"
    );
}

#[tokio::test]
async fn rejected_request_writes_nothing() {
    let server = start_generation_server(400, br#"{"error": "No data generated"}"#).await;
    let temp_dir = tempfile::tempdir().unwrap();
    let (dispatcher, notifier, diagnostics) = dispatcher_for(&server, temp_dir.path());
    dispatcher.form().check_str("65263").unwrap();

    assert!(dispatcher.generate().await.is_err());

    assert_eq!(notifier.notices(), vec![Notice::GenerationFailed]);
    assert!(diagnostics.codes().is_empty());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    assert!(dispatcher.control().state().enabled);
}

#[tokio::test]
async fn config_file_drives_the_dispatcher() {
    let server = start_generation_server(200, b"0x18FEF100h\n00 00 19 00 FF FF FF FF\n").await;
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("j1939-dl.json");
    let download_dir = temp_dir.path().join("out");
    std::fs::write(
        &config_path,
        serde_json::to_string(&json!({
            "server": {"base_url": server.uri()},
            "download": {"download_dir": download_dir, "filename_stem": "ccvs"},
            "form": {"format": "txt", "duration": 5}
        }))
        .unwrap(),
    )
    .unwrap();

    let config = Config::from_json_file(&config_path).unwrap();
    let dispatcher = RequestDispatcher::new(config)
        .unwrap()
        .with_notifier(Arc::new(RecordingNotifier::default()));
    dispatcher.form().check_str("65265").unwrap();

    let file = dispatcher.generate().await.unwrap();
    assert_eq!(file.path, download_dir.join("ccvs.txt"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"pgns": ["65265"], "format": "txt", "duration": 5}));
}
