//! Score reporting for finished sessions.
//!
//! The game loop is synchronous; the leaderboard is an HTTP service. A
//! [`ScoreReporter`] owns a small tokio runtime, runs the [`ScoreSink`] call
//! there and hands the outcome back over a channel the loop drains with
//! `try_recv`.
//!
//! - [`protocol`]: JSON wire shapes
//! - [`sink`]: the sink trait, the hyper-backed HTTP sink and an in-memory sink
//! - [`reporter`]: once-per-session submission state
//! - [`config`]: environment configuration

pub mod config;
pub mod error;
pub mod protocol;
pub mod reporter;
pub mod sink;

pub use arcade_tetris_types as types;

pub use config::ReportConfig;
pub use error::{ConfigError, ReportError};
pub use protocol::{LeaderboardEntry, LeaderboardResponse, ScoreSubmission, SubmitAck};
pub use reporter::{ReportEvent, ScoreReporter, SubmitState};
pub use sink::{ConfiguredSink, HttpScoreSink, MemorySink, ScoreSink};
