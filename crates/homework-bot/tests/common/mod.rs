//! Shared test harness for integration tests.

#![allow(dead_code, clippy::arithmetic_side_effects)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use homework_bot::{BotError, BotResult, Clock, HomeworkApi, Messenger};
use homework_config::Settings;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Settings with every secret filled in and the given endpoint.
pub fn settings(endpoint: &str) -> Settings {
    Settings {
        practicum_token: "practicum-token".to_string(),
        telegram_token: "123:ABC".to_string(),
        chat_id: "42".to_string(),
        endpoint: endpoint.to_string(),
        telegram_api_url: None,
        retry_period: Duration::from_secs(600),
        initial_lookback: Duration::from_secs(604_800),
    }
}

// ---------------------------------------------------------------------------
// ScriptedApi
// ---------------------------------------------------------------------------

/// A `HomeworkApi` that replays queued responses and records each `from_date`.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    responses: Arc<Mutex<VecDeque<BotResult<Value>>>>,
    calls: Arc<Mutex<Vec<i64>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body.
    #[must_use]
    pub fn then_json(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn then_err(self, err: BotError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// `from_date` values seen so far.
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeworkApi for ScriptedApi {
    async fn fetch(&self, from_date: i64) -> BotResult<Value> {
        self.calls.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BotError::Transport("no scripted response".to_string())))
    }
}

// ---------------------------------------------------------------------------
// RecordingMessenger
// ---------------------------------------------------------------------------

/// A `Messenger` that records every delivery attempt.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with a delivery error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every text passed to `send`, including failed attempts.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, text: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(BotError::Delivery("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// A `Clock` whose sleeps return immediately and advance a fake time.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        let secs = i64::try_from(duration.as_secs()).unwrap();
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// StubServer
// ---------------------------------------------------------------------------

/// One HTTP request as seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `GET /api/user_api/homework_statuses/?from_date=1000 HTTP/1.1`
    pub request_line: String,
    /// Header names are lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == &name.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }
}

/// A local HTTP server answering every request with the same canned response.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Start serving `body` with HTTP `status` on an ephemeral port.
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let body = body.clone();
                tokio::spawn(async move {
                    handle(stream, status, &body, &recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// `http://127.0.0.1:<port>` with no trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Read one request, record it, then answer.
async fn handle(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);
    let request_body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();
    recorded.lock().unwrap().push(RecordedRequest {
        request_line,
        headers,
        body: request_body,
    });

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok()?;
    Some(())
}
