//! Shared utilities for integration testing against a mock upstream.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use splortshub::config::{HubConfig, RetryConfig};

/// The parts of an upstream request a test cares about.
#[derive(Debug, Clone, Default)]
pub struct MockRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` maps each request to a `(status, body)` pair.
pub async fn start_mock_upstream<F>(f: F) -> SocketAddr
where
    F: Fn(MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(request);
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let text = String::from_utf8_lossy(&buf);
    let mut lines = text.split("\r\n");
    let target = lines.next()?.split_whitespace().nth(1)?.to_string();
    let (path, raw_query) = target.split_once('?').unwrap_or((target.as_str(), ""));

    let query = url::form_urlencoded::parse(raw_query.as_bytes())
        .into_owned()
        .collect();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    Some(MockRequest {
        path: path.to_string(),
        query,
        headers,
    })
}

/// Config pointing at a mock upstream, with a short retry budget.
pub fn hub_config(upstream: SocketAddr) -> HubConfig {
    let mut config = HubConfig::default();
    config.upstream.base_url = format!("http://{}/", upstream);
    config.upstream.auth_cookie = "test-session".to_string();
    config.upstream.request_timeout_secs = 2;
    config.retries = RetryConfig {
        base_delay_ms: 20,
        max_delay_ms: 100,
        max_elapsed_ms: 500,
    };
    config
}

/// A complete upstream team record.
pub fn team_json(id: &str, full_name: &str, rosters: [&[&str]; 4]) -> Value {
    let [lineup, rotation, bullpen, bench] = rosters;
    json!({
        "_id": id,
        "fullName": full_name,
        "location": full_name.split(' ').next().unwrap_or(""),
        "nickname": full_name.split(' ').last().unwrap_or(""),
        "emoji": "0x1F3C6",
        "seasonShames": 0,
        "seasonShamings": 0,
        "shameRuns": 0,
        "totalShames": 0,
        "totalShamings": 0,
        "slogan": "Go team",
        "championships": 0,
        "lineup": lineup,
        "rotation": rotation,
        "bullpen": bullpen,
        "bench": bench,
    })
}

/// A complete upstream player record.
pub fn player_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "bat": "",
        "anticapitalism": 0.5,
        "baseThirst": 0.5,
        "buoyancy": 0.5,
        "chasiness": 0.5,
        "coldness": 0.5,
        "continuation": 0.5,
        "divinity": 0.5,
        "groundFriction": 0.5,
        "indulgence": 0.5,
        "laserlikeness": 0.5,
        "martyrdom": 0.5,
        "moxie": 0.5,
        "musclitude": 0.5,
        "omniscience": 0.5,
        "overpowerment": 0.5,
        "patheticism": 0.5,
        "ruthlessness": 0.5,
        "shakespearianism": 0.5,
        "suppression": 0.5,
        "tenaciousness": 0.5,
        "thwackability": 0.5,
        "tragicness": 0.5,
        "unthwackability": 0.5,
        "watchfulness": 0.5,
        "pressurization": 0.5,
        "totalFingers": 10,
        "soul": 7,
        "deceased": false,
        "peanutAllergy": false,
        "cinnamon": 0.5,
        "fate": 42,
    })
}
