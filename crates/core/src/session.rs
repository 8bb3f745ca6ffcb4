//! Game session - the engine plus the gravity timer that drives it.
//!
//! This is the only place ticks are generated automatically. After every
//! command and every tick the timer is re-synced with the engine phase:
//! armed with the level's period while `Running`, disarmed otherwise, and
//! given the new period when the level changes.

use crate::engine::GameEngine;
use crate::rng::{PieceRandomizer, UniformRandomizer};
use crate::snapshot::GameSnapshot;
use crate::timer::GravityTimer;
use crate::types::{GameAction, LockEvent, Phase};

#[derive(Debug, Clone)]
pub struct GameSession<R = UniformRandomizer> {
    engine: GameEngine<R>,
    timer: GravityTimer,
}

impl<R: PieceRandomizer> GameSession<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let mut session = Self {
            engine,
            timer: GravityTimer::new(),
        };
        session.sync_timer();
        session
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Apply one command; returns whether the engine state changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.engine.apply_action(action);
        self.sync_timer();
        changed
    }

    /// Start a new session from any phase.
    pub fn restart(&mut self) -> bool {
        let changed = self.engine.restart();
        self.sync_timer();
        changed
    }

    /// Feed elapsed time and run every tick that came due.
    ///
    /// Returns the number of ticks processed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.timer.accumulate(elapsed_ms);
        let mut ticks = 0;
        while self.timer.take_due() {
            self.engine.tick();
            ticks += 1;
            self.sync_timer();
        }
        ticks
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.engine.take_last_event()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.snapshot_into(out);
    }

    fn sync_timer(&mut self) {
        let period = self.engine.tick_period_ms();
        if self.engine.phase().is_running() {
            if !self.timer.is_armed() {
                self.timer.arm(period);
            } else if self.timer.period_ms() != period {
                log::debug!("gravity period -> {}ms", period);
                self.timer.set_period(period);
            }
        } else if self.timer.is_armed() {
            self.timer.disarm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandomizer;
    use crate::types::{Cell, PieceKind};

    fn session() -> GameSession<SequenceRandomizer> {
        let mut s = GameSession::new(GameEngine::new(SequenceRandomizer::new(vec![PieceKind::T])));
        assert!(s.apply(GameAction::Start));
        s
    }

    #[test]
    fn idle_session_has_no_timer() {
        let s = GameSession::new(GameEngine::with_seed(9));
        assert!(!s.timer().is_armed());
    }

    #[test]
    fn start_arms_at_level_period() {
        let s = session();
        assert!(s.timer().is_armed());
        assert_eq!(s.timer().period_ms(), 800);
    }

    #[test]
    fn advance_ticks_at_period() {
        let mut s = session();
        assert_eq!(s.advance(799), 0);
        assert_eq!(s.engine().active().unwrap().y, 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.engine().active().unwrap().y, 1);
    }

    #[test]
    fn pause_disarms_and_resume_rearms() {
        let mut s = session();
        s.advance(500);
        assert!(s.apply(GameAction::TogglePause));
        assert!(!s.timer().is_armed());
        let before = s.snapshot();
        assert_eq!(s.advance(100_000), 0);
        assert_eq!(s.snapshot(), before);

        assert!(s.apply(GameAction::TogglePause));
        assert!(s.timer().is_armed());
        // The interval restarts from zero on resume.
        assert_eq!(s.advance(799), 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.engine().active().unwrap().y, 1);
    }

    #[test]
    fn level_up_period_applies_from_next_interval() {
        let mut s = GameSession::new(GameEngine::new(SequenceRandomizer::new(vec![PieceKind::I])));
        s.apply(GameAction::Start);
        s.engine.set_score(950);
        for x in 0..4 {
            s.engine.board_mut().set(x, 19, Cell::Filled(6));
        }
        for x in 8..10 {
            s.engine.board_mut().set(x, 19, Cell::Filled(6));
        }

        assert_eq!(s.advance(300), 0);
        assert!(s.apply(GameAction::HardDrop));
        assert_eq!(s.engine().score(), 1050);
        assert_eq!(s.engine().level(), 2);
        assert_eq!(s.timer().period_ms(), 700);

        // The interval in progress keeps its 800ms deadline.
        assert_eq!(s.advance(399), 0);
        assert_eq!(s.advance(100), 0);
        assert_eq!(s.advance(1), 1);
        // The next one runs at the new period.
        assert_eq!(s.advance(699), 0);
        assert_eq!(s.advance(1), 1);
    }

    #[test]
    fn game_over_disarms() {
        let mut s = session();
        while s.phase() == Phase::Running {
            s.apply(GameAction::HardDrop);
        }
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.timer().is_armed());
        assert_eq!(s.advance(10_000), 0);
    }
}
