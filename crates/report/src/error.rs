use thiserror::Error;

/// Failure of a single report or leaderboard request.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid request: {0}")]
    Request(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("service rejected the score: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid game id {0:?}")]
    InvalidGame(String),

    #[error("failed to start reporter runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Configuration problems found while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid leaderboard url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
