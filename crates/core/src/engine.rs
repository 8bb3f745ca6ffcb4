//! Game engine - owns the board, the live piece, score, level and phase
//!
//! Every command is applied synchronously and is all-or-nothing: a move or
//! rotation either commits fully or leaves the state untouched, and a lock
//! runs merge, line clear, scoring and respawn as one step. Nothing
//! half-applied is ever visible through the accessors or the snapshot.

use crate::board::Board;
use crate::collision::{collides, piece_collides};
use crate::pieces::Piece;
use crate::rng::{PieceRandomizer, UniformRandomizer};
use crate::scoring::{apply_line_clear, level_for_score, tick_period_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, Phase};

/// A single game session.
///
/// The randomizer is injected so tests can script the piece sequence.
#[derive(Debug, Clone)]
pub struct GameEngine<R = UniformRandomizer> {
    board: Board,
    active: Option<Piece>,
    randomizer: R,
    score: u32,
    level: u32,
    lines: u32,
    phase: Phase,
    /// Monotonic session id (increments on every start/restart).
    session_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameEngine<UniformRandomizer> {
    /// Engine with a uniform randomizer seeded with `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::new(UniformRandomizer::new(seed))
    }
}

impl<R: PieceRandomizer> GameEngine<R> {
    pub fn new(randomizer: R) -> Self {
        Self {
            board: Board::new(),
            active: None,
            randomizer,
            score: 0,
            level: 1,
            lines: 0,
            phase: Phase::Idle,
            session_id: 0,
            last_event: None,
        }
    }

    /// Begin a session from `Idle` or `GameOver`.
    ///
    /// Returns false (and changes nothing) while a session is running or paused.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                self.reset();
                true
            }
            Phase::Running | Phase::Paused => false,
        }
    }

    /// Throw away the current session and start a fresh one from any phase.
    pub fn restart(&mut self) -> bool {
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.last_event = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.phase = Phase::Running;
        log::info!("session {} started", self.session_id);
        self.spawn_piece();
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
        self.level = crate::scoring::level_for_score(score);
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Gravity period for the current level
    pub fn tick_period_ms(&self) -> u32 {
        tick_period_ms(self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Draw the next kind and place it at the spawn anchor.
    ///
    /// A spawn that collides ends the session; the board is left as-is.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawn(self.randomizer.next_kind());
        if piece_collides(&piece, &self.board) {
            self.active = None;
            self.phase = Phase::GameOver;
            log::info!(
                "session {} over: score {} level {} lines {}",
                self.session_id,
                self.score,
                self.level,
                self.lines
            );
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Shift the live piece if the target position is free.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if collides(&active.shape, active.x + dx, active.y + dy, &self.board) {
            return false;
        }
        self.active = Some(active.moved(dx, dy));
        true
    }

    /// One gravity step: fall a row, or lock when blocked.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        true
    }

    /// Manual fast descent; identical to one tick.
    pub fn soft_drop(&mut self) -> bool {
        self.tick()
    }

    /// `dir` is -1 (left) or +1 (right); blocked moves are ignored.
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        if self.phase != Phase::Running || dir == 0 {
            return false;
        }
        self.try_move(dir.signum(), 0)
    }

    /// Rotate clockwise in place; a colliding rotation is rejected (no kicks).
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotated_cw();
        if piece_collides(&rotated, &self.board) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Drop as far as collision allows and lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let landing_y = self.landing_y(&active);
        self.active = Some(Piece {
            y: landing_y,
            ..active
        });
        self.lock_piece();
        true
    }

    fn landing_y(&self, piece: &Piece) -> i8 {
        let mut y = piece.y;
        while !collides(&piece.shape, piece.x, y + 1, &self.board) {
            y += 1;
        }
        y
    }

    /// Row where the live piece would land (for a renderer's drop preview)
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|p| self.landing_y(&p))
    }

    /// Merge the live piece, clear rows, score, and spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(&active);
        let cleared = self.board.clear_full_rows().len() as u32;

        let previous_level = self.level;
        let mut gained = 0;
        if cleared > 0 {
            let result = apply_line_clear(self.score, self.level, cleared);
            gained = result.gained;
            self.score = result.score;
            self.level = result.level;
            self.lines += cleared;
            log::debug!(
                "cleared {} line(s): +{} -> score {} level {}",
                cleared,
                gained,
                self.score,
                self.level
            );
        }
        debug_assert_eq!(self.level, level_for_score(self.score));

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            score_gained: gained,
            level_up: self.level > previous_level,
            game_over: !spawned,
        });
    }

    /// Apply a game action; returns whether any state changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Start => self.start(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.session_id = self.session_id;
        out.tick_ms = self.tick_period_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameEngine<UniformRandomizer> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
