//! Score sinks: where finished-session scores go.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::{validate_url, ReportConfig};
use crate::error::{ConfigError, ReportError};
use crate::protocol::{
    is_valid_game_id, ErrorBody, LeaderboardResponse, ScoreSubmission, SubmitAck,
};

/// Destination for score reports.
pub trait ScoreSink: Send + Sync + 'static {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<SubmitAck, ReportError>> + Send;
}

impl<S: ScoreSink> ScoreSink for Arc<S> {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<SubmitAck, ReportError>> + Send {
        S::submit(&**self, submission)
    }
}

/// Leaderboard service over plain HTTP/1.
#[derive(Clone)]
pub struct HttpScoreSink {
    client: Client<HttpConnector, Full<Bytes>>,
    endpoint: Uri,
    timeout: Duration,
}

impl HttpScoreSink {
    pub fn new(config: &ReportConfig) -> Result<Self, ConfigError> {
        let endpoint = validate_url(&config.url)?;
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Top scores for `game`, best first as returned by the service.
    pub async fn fetch_leaderboard(&self, game: &str) -> Result<LeaderboardResponse, ReportError> {
        if !is_valid_game_id(game) {
            return Err(ReportError::InvalidGame(game.to_string()));
        }
        let uri = format!("{}?game={}", self.endpoint, game);
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .map_err(|e| ReportError::Request(e.to_string()))?;

        let (status, body) = self.send(req).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// [`fetch_leaderboard`](Self::fetch_leaderboard) on a throwaway
    /// current-thread runtime, for synchronous callers.
    pub fn fetch_leaderboard_blocking(&self, game: &str) -> Result<LeaderboardResponse, ReportError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.fetch_leaderboard(game))
    }

    async fn send(&self, req: Request<Full<Bytes>>) -> Result<(StatusCode, Bytes), ReportError> {
        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| ReportError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| ReportError::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, ReportError>((status, body))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ReportError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

impl ScoreSink for HttpScoreSink {
    async fn submit(&self, submission: ScoreSubmission) -> Result<SubmitAck, ReportError> {
        let json = serde_json::to_vec(&submission)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(json)))
            .map_err(|e| ReportError::Request(e.to_string()))?;

        let (status, body) = self.send(req).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        let ack: SubmitAck = serde_json::from_slice(&body)?;
        if !ack.success {
            let message = ack.message.unwrap_or_else(|| "no reason given".to_string());
            return Err(ReportError::Rejected(message));
        }
        Ok(ack)
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ReportError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
    ReportError::Status {
        status: status.as_u16(),
        message,
    }
}

/// In-memory sink: records every accepted submission.
///
/// Used for offline play and tests. `fail_next` makes the next `n` calls
/// fail with a transport error.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    accepted: Vec<ScoreSubmission>,
    failures_left: u32,
    calls: u32,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, n: u32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failures_left = n;
        }
    }

    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.inner
            .lock()
            .map(|inner| inner.accepted.clone())
            .unwrap_or_default()
    }

    /// Number of submit calls, failed ones included.
    pub fn calls(&self) -> u32 {
        self.inner.lock().map(|inner| inner.calls).unwrap_or(0)
    }

    /// Accepted scores for `game`, best first.
    pub fn leaderboard(&self, game: &str) -> LeaderboardResponse {
        let mut rows: Vec<_> = self
            .submissions()
            .into_iter()
            .filter(|s| s.game_name == game)
            .map(|s| crate::protocol::LeaderboardEntry {
                player_name: s.player_name,
                score: s.score,
                created_at: None,
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        LeaderboardResponse {
            game: game.to_string(),
            leaderboard: rows,
        }
    }

    fn record(&self, submission: ScoreSubmission) -> Result<SubmitAck, ReportError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ReportError::Transport("memory sink poisoned".to_string()))?;
        inner.calls += 1;
        if inner.failures_left > 0 {
            inner.failures_left -= 1;
            return Err(ReportError::Transport("injected failure".to_string()));
        }
        inner.accepted.push(submission.clone());
        Ok(SubmitAck {
            success: true,
            message: Some("Score saved".to_string()),
            data: Some(submission),
        })
    }
}

impl ScoreSink for MemorySink {
    async fn submit(&self, submission: ScoreSubmission) -> Result<SubmitAck, ReportError> {
        self.record(submission)
    }
}

/// Sink chosen from [`ReportConfig`]: HTTP normally, memory when reporting
/// is disabled.
#[derive(Clone)]
pub enum ConfiguredSink {
    Http(HttpScoreSink),
    Memory(MemorySink),
}

impl ConfiguredSink {
    pub fn from_config(config: &ReportConfig) -> Result<Self, ConfigError> {
        if config.disabled {
            log::info!("score reporting disabled; keeping scores in memory");
            return Ok(ConfiguredSink::Memory(MemorySink::new()));
        }
        Ok(ConfiguredSink::Http(HttpScoreSink::new(config)?))
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, ConfiguredSink::Memory(_))
    }
}

impl ScoreSink for ConfiguredSink {
    async fn submit(&self, submission: ScoreSubmission) -> Result<SubmitAck, ReportError> {
        match self {
            ConfiguredSink::Http(sink) => sink.submit(submission).await,
            ConfiguredSink::Memory(sink) => sink.submit(submission).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, score: u32) -> ScoreSubmission {
        ScoreSubmission::new(name, "tetris", score).unwrap()
    }

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        let ack = tokio_test::block_on(sink.submit(submission("Ann", 500))).unwrap();
        assert!(ack.success);
        assert_eq!(sink.submissions(), vec![submission("Ann", 500)]);
        assert_eq!(sink.calls(), 1);
    }

    #[test]
    fn test_memory_sink_failure_injection() {
        let sink = MemorySink::new();
        sink.fail_next(1);
        let first = tokio_test::block_on(sink.submit(submission("Ann", 500)));
        assert!(matches!(first, Err(ReportError::Transport(_))));
        assert!(sink.submissions().is_empty());

        let second = tokio_test::block_on(sink.submit(submission("Ann", 500)));
        assert!(second.is_ok());
        assert_eq!(sink.calls(), 2);
        assert_eq!(sink.submissions().len(), 1);
    }

    #[test]
    fn test_memory_leaderboard_sorted_and_filtered() {
        let sink = MemorySink::new();
        for (name, score) in [("a", 100), ("b", 900), ("c", 400)] {
            tokio_test::block_on(sink.submit(submission(name, score))).unwrap();
        }
        let other = ScoreSubmission::new("d", "snake", 5000).unwrap();
        tokio_test::block_on(sink.submit(other)).unwrap();

        let lb = sink.leaderboard("tetris");
        let scores: Vec<u32> = lb.leaderboard.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 400, 100]);
    }

    #[test]
    fn test_status_error_prefers_error_body() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"Database not configured"}"#);
        match err {
            ReportError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database not configured");
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = status_error(StatusCode::BAD_GATEWAY, b"upstream down");
        assert!(matches!(err, ReportError::Status { status: 502, ref message } if message == "upstream down"));
    }

    #[test]
    fn test_configured_sink_follows_disabled_flag() {
        let offline = ReportConfig {
            disabled: true,
            ..ReportConfig::default()
        };
        assert!(ConfiguredSink::from_config(&offline).unwrap().is_offline());
        assert!(!ConfiguredSink::from_config(&ReportConfig::default())
            .unwrap()
            .is_offline());
    }

    #[test]
    fn test_configured_memory_sink_accepts() {
        let offline = ReportConfig {
            disabled: true,
            ..ReportConfig::default()
        };
        let sink = ConfiguredSink::from_config(&offline).unwrap();
        let ack = tokio_test::block_on(sink.submit(submission("Ann", 10))).unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_http_sink_rejects_bad_game_id() {
        let sink = HttpScoreSink::new(&ReportConfig::default()).unwrap();
        let err = sink.fetch_leaderboard("a b").await.unwrap_err();
        assert!(matches!(err, ReportError::InvalidGame(_)));
    }

    #[tokio::test]
    async fn test_http_sink_reports_transport_error() {
        // Port 9 on loopback is not expected to be listening.
        let config = ReportConfig::default()
            .with_url("http://127.0.0.1:9/leaderboard")
            .unwrap();
        let sink = HttpScoreSink::new(&config).unwrap();
        let err = sink.submit(submission("Ann", 1)).await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::Transport(_) | ReportError::Timeout(_)
        ));
    }
}
