//! Once-per-session score reporting.
//!
//! [`SubmitState`] is the pure bookkeeping: a session's score is sent at
//! most once; a failure returns to `NotSubmitted` so an explicit retry is
//! possible. [`ScoreReporter`] pairs it with a background tokio runtime so
//! the game loop never waits on the network.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::error::ReportError;
use crate::protocol::{ScoreSubmission, SubmitAck};
use crate::sink::ScoreSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    NotSubmitted,
    /// A report is in flight.
    Pending,
    Submitted,
}

impl SubmitState {
    /// Start a report for this session.
    ///
    /// Returns the submission to send, or `None` if the name is blank or a
    /// report is already in flight or accepted.
    pub fn begin(&mut self, player_name: &str, game_id: &str, score: u32) -> Option<ScoreSubmission> {
        if *self != SubmitState::NotSubmitted {
            return None;
        }
        let submission = ScoreSubmission::new(player_name, game_id, score)?;
        *self = SubmitState::Pending;
        Some(submission)
    }

    pub fn resolve(&mut self, accepted: bool) {
        if *self == SubmitState::Pending {
            *self = if accepted {
                SubmitState::Submitted
            } else {
                SubmitState::NotSubmitted
            };
        }
    }

    pub fn reset(&mut self) {
        *self = SubmitState::NotSubmitted;
    }
}

/// Outcome of a background report, delivered to the game loop.
#[derive(Debug)]
pub enum ReportEvent {
    Submitted {
        submission: ScoreSubmission,
        ack: SubmitAck,
    },
    Failed {
        submission: ScoreSubmission,
        error: ReportError,
    },
}

impl ReportEvent {
    pub fn submission(&self) -> &ScoreSubmission {
        match self {
            ReportEvent::Submitted { submission, .. } | ReportEvent::Failed { submission, .. } => {
                submission
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReportEvent::Submitted { .. })
    }
}

/// Tagged with the generation that spawned it so results from a previous
/// session are ignored after `reset`.
struct Outcome {
    generation: u64,
    event: ReportEvent,
}

/// Score reporter bridging the sync game loop with an async sink.
pub struct ScoreReporter<S: ScoreSink> {
    rt: Runtime,
    sink: Arc<S>,
    state: SubmitState,
    generation: u64,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl<S: ScoreSink> ScoreReporter<S> {
    pub fn new(sink: S) -> Result<Self, ReportError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("arcade-report")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            sink: Arc::new(sink),
            state: SubmitState::default(),
            generation: 0,
            tx,
            rx,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SubmitState::Submitted
    }

    pub fn is_pending(&self) -> bool {
        self.state == SubmitState::Pending
    }

    /// Report `score` for the current session.
    ///
    /// Returns `true` if a report was started. Blank names and repeat
    /// submissions are no-ops.
    pub fn submit(&mut self, player_name: &str, game_id: &str, score: u32) -> bool {
        let Some(submission) = self.state.begin(player_name, game_id, score) else {
            log::debug!("score report skipped (state {:?})", self.state);
            return false;
        };

        let sink = Arc::clone(&self.sink);
        let tx = self.tx.clone();
        let generation = self.generation;
        self.rt.spawn(async move {
            let event = match sink.submit(submission.clone()).await {
                Ok(ack) => ReportEvent::Submitted { submission, ack },
                Err(error) => ReportEvent::Failed { submission, error },
            };
            let _ = tx.send(Outcome { generation, event });
        });
        true
    }

    /// Forget the previous session's report.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state.reset();
    }

    /// Next finished report for the current session, without blocking.
    pub fn try_recv(&mut self) -> Option<ReportEvent> {
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(event) = self.accept(outcome) {
                return Some(event);
            }
        }
        None
    }

    /// Wait up to `timeout` for the in-flight report, if any.
    pub fn flush(&mut self, timeout: Duration) -> Option<ReportEvent> {
        while self.is_pending() {
            let outcome = self
                .rt
                .block_on(async { tokio::time::timeout(timeout, self.rx.recv()).await })
                .ok()
                .flatten()?;
            if let Some(event) = self.accept(outcome) {
                return Some(event);
            }
        }
        None
    }

    fn accept(&mut self, outcome: Outcome) -> Option<ReportEvent> {
        if outcome.generation != self.generation {
            log::debug!("dropping report result from an earlier session");
            return None;
        }
        let event = outcome.event;
        match &event {
            ReportEvent::Submitted { submission, .. } => log::info!(
                "score {} for {} submitted to {}",
                submission.score,
                submission.player_name,
                submission.game_name
            ),
            ReportEvent::Failed { error, .. } => log::warn!("score report failed: {}", error),
        }
        self.state.resolve(event.is_success());
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_state_begin_once() {
        let mut state = SubmitState::default();
        assert!(state.begin("Ann", "tetris", 500).is_some());
        assert_eq!(state, SubmitState::Pending);
        assert!(state.begin("Ann", "tetris", 500).is_none());
        state.resolve(true);
        assert_eq!(state, SubmitState::Submitted);
        assert!(state.begin("Ann", "tetris", 500).is_none());
    }

    #[test]
    fn test_state_failure_allows_retry() {
        let mut state = SubmitState::default();
        state.begin("Ann", "tetris", 500);
        state.resolve(false);
        assert_eq!(state, SubmitState::NotSubmitted);
        assert!(state.begin("Ann", "tetris", 500).is_some());
    }

    #[test]
    fn test_state_blank_name_is_noop() {
        let mut state = SubmitState::default();
        assert!(state.begin("   ", "tetris", 500).is_none());
        assert_eq!(state, SubmitState::NotSubmitted);
    }

    #[test]
    fn test_resolve_without_pending_is_ignored() {
        let mut state = SubmitState::default();
        state.resolve(true);
        assert_eq!(state, SubmitState::NotSubmitted);
    }

    #[test]
    fn test_submit_is_idempotent() {
        let sink = MemorySink::new();
        let mut reporter = ScoreReporter::new(sink.clone()).unwrap();

        assert!(reporter.submit("Ann", "tetris", 500));
        assert!(!reporter.submit("Ann", "tetris", 500));
        let event = reporter.flush(WAIT).unwrap();
        assert!(event.is_success());
        assert!(reporter.is_submitted());
        assert!(!reporter.submit("Ann", "tetris", 500));

        assert_eq!(sink.submissions().len(), 1);
        assert_eq!(sink.submissions()[0].player_name, "Ann");
    }

    #[test]
    fn test_failure_then_retry() {
        let sink = MemorySink::new();
        sink.fail_next(1);
        let mut reporter = ScoreReporter::new(sink.clone()).unwrap();

        assert!(reporter.submit("Ann", "tetris", 500));
        let event = reporter.flush(WAIT).unwrap();
        assert!(matches!(event, ReportEvent::Failed { .. }));
        assert_eq!(reporter.state(), SubmitState::NotSubmitted);

        assert!(reporter.submit("Ann", "tetris", 500));
        assert!(reporter.flush(WAIT).unwrap().is_success());
        assert_eq!(sink.calls(), 2);
        assert_eq!(sink.submissions().len(), 1);
    }

    #[test]
    fn test_reset_drops_stale_result() {
        let sink = MemorySink::new();
        let mut reporter = ScoreReporter::new(sink.clone()).unwrap();

        assert!(reporter.submit("Ann", "tetris", 500));
        reporter.reset();
        assert_eq!(reporter.state(), SubmitState::NotSubmitted);

        // The old report may still land in the sink but is not surfaced.
        std::thread::sleep(Duration::from_millis(50));
        assert!(reporter.try_recv().is_none());
        assert!(reporter.submit("Bo", "tetris", 100));
        let event = reporter.flush(WAIT).unwrap();
        assert_eq!(event.submission().player_name, "Bo");
    }

    #[test]
    fn test_flush_without_pending_returns_none() {
        let mut reporter = ScoreReporter::new(MemorySink::new()).unwrap();
        assert!(reporter.flush(Duration::from_millis(10)).is_none());
    }
}
