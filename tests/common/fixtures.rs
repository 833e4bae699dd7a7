//! Generated dataset bodies and a fake generation server

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// CSV body as the generation server renders it (payload column dropped)
pub const CSV_DATASET: &str = "time_ms,pgn_dec,pgn_hex,dlc,payload_hex,Engine Coolant Temperature,Engine Oil Temperature\n\
0,65262,0x18FEEE00,8,78 FF 40 7D FF FF FF FF,80.0,90.0\n\
1000,65262,0x18FEEE00,8,78 FF 48 7D FF FF FF FF,80.5,90.2\n";

/// PEAK trace body
pub const TRC_DATASET: &str = ";$FILEVERSION=1.1\n\
;$STARTTIME=0\n\
;   Message Number  Time(ms)   Type    ID     DLC  Data Bytes\n\
     1        0.0 Rx 0CF00400 8 00 7D 7D 00 4B 00 00 7D\n";

/// Start a generation server that answers every POST /generate with `status` and `body`
pub async fn start_generation_server(status: u16, body: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(&server)
        .await;
    server
}
