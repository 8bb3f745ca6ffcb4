//! Interactive shell around one game session.
//!
//! Owns the session, the score reporter and the game-over name prompt.
//! Keys and elapsed time go in; a snapshot and a report status come out.
//! No terminal I/O happens here, so the whole flow is testable.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{GameSession, GameSnapshot, PieceRandomizer};
use crate::input::{apply_event, handle_key_event, InputEvent, NameEntry, NameEntryOutcome};
use crate::report::{ReportEvent, ScoreReporter, ScoreSink};
use crate::term::ReportStatusView;
use crate::types::{Phase, GAME_ID};

pub struct Shell<R: PieceRandomizer, S: ScoreSink> {
    session: GameSession<R>,
    reporter: ScoreReporter<S>,
    entry: Option<NameEntry>,
    report: ReportStatusView,
    default_player: Option<String>,
    last_name: Option<String>,
    /// Session whose game-over prompt was already offered
    prompted_session: Option<u32>,
    seen_session: u32,
    quit: bool,
}

impl<R: PieceRandomizer, S: ScoreSink> Shell<R, S> {
    pub fn new(session: GameSession<R>, reporter: ScoreReporter<S>, default_player: Option<String>) -> Self {
        let seen_session = session.engine().session_id();
        Self {
            session,
            reporter,
            entry: None,
            report: ReportStatusView::Hidden,
            default_player,
            last_name: None,
            prompted_session: None,
            seen_session,
            quit: false,
        }
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn reporter(&self) -> &ScoreReporter<S> {
        &self.reporter
    }

    pub fn report_status(&self) -> &ReportStatusView {
        &self.report
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        if let Some(entry) = self.entry.as_mut() {
            match entry.handle_key(key) {
                NameEntryOutcome::Edited => {
                    self.report = ReportStatusView::EnterName(entry.text().to_string());
                }
                NameEntryOutcome::Submit => {
                    let name = entry.text().to_string();
                    self.entry = None;
                    self.submit(&name);
                }
                NameEntryOutcome::Cancel => {
                    self.entry = None;
                    self.report = ReportStatusView::Skipped;
                }
                NameEntryOutcome::Ignored => {}
            }
            return;
        }

        if self.session.phase() == Phase::GameOver
            && key.code == KeyCode::Enter
            && matches!(self.report, ReportStatusView::Failed(_))
        {
            self.open_entry(self.last_name.clone());
            return;
        }

        match handle_key_event(key) {
            Some(InputEvent::Quit) => self.quit = true,
            Some(event) => {
                apply_event(&mut self.session, event);
            }
            None => {}
        }
        self.sync();
    }

    /// Advance gravity by `elapsed` and collect report results.
    pub fn update(&mut self, elapsed: Duration) {
        let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        self.session.advance(ms);
        if let Some(event) = self.session.take_last_event() {
            if event.lines_cleared > 0 {
                log::debug!(
                    "cleared {} line(s) for {} points",
                    event.lines_cleared,
                    event.score_gained
                );
            }
        }
        while let Some(event) = self.reporter.try_recv() {
            self.on_report(event);
        }
        self.sync();
    }

    /// Wait for an in-flight report before exiting.
    pub fn flush(&mut self, timeout: Duration) {
        if let Some(event) = self.reporter.flush(timeout) {
            self.on_report(event);
        }
    }

    fn submit(&mut self, name: &str) {
        let score = self.session.engine().score();
        self.last_name = Some(name.to_string());
        if self.reporter.submit(name, GAME_ID, score) {
            self.report = ReportStatusView::Pending;
        }
    }

    fn on_report(&mut self, event: ReportEvent) {
        self.report = match event {
            ReportEvent::Submitted { .. } => ReportStatusView::Saved,
            ReportEvent::Failed { error, .. } => ReportStatusView::Failed(error.to_string()),
        };
    }

    fn open_entry(&mut self, prefill: Option<String>) {
        let entry = NameEntry::with_text(prefill.as_deref().unwrap_or(""));
        self.report = ReportStatusView::EnterName(entry.text().to_string());
        self.entry = Some(entry);
    }

    /// React to session changes: a new session resets the reporter, a
    /// finished one with points opens the name prompt once.
    fn sync(&mut self) {
        let session_id = self.session.engine().session_id();
        if session_id != self.seen_session {
            self.seen_session = session_id;
            self.reporter.reset();
            self.entry = None;
            self.report = ReportStatusView::Hidden;
        }

        if self.session.phase() == Phase::GameOver && self.prompted_session != Some(session_id) {
            self.prompted_session = Some(session_id);
            let score = self.session.engine().score();
            log::info!("game over with score {}", score);
            if score > 0 {
                self.open_entry(self.default_player.clone());
            }
        }
    }
}
