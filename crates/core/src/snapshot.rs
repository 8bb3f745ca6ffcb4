//! Read-only view of the engine for renderers.
//!
//! The live piece is reported next to the settled grid, never merged into it.
//! [`GameSnapshot::cell_at`] composes the two for drawing.

use crate::pieces::{Piece, Shape};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Whether the piece covers board cell (x, y)
    pub fn covers(&self, x: i8, y: i8) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        dx >= 0 && dy >= 0 && self.shape.is_filled(dx as usize, dy as usize)
    }
}

/// What a renderer should paint at one board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCell {
    Empty,
    /// Settled cell with its color index
    Settled(u8),
    /// Cell of the falling piece with its color index
    Active(u8),
    /// Landing preview of the falling piece
    Ghost(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled cells: 0 = empty, otherwise color index + 1
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
    pub session_id: u32,
    /// Gravity period for the current level
    pub tick_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase.is_running()
    }

    /// Composite of settled board, ghost and live piece at (x, y).
    pub fn cell_at(&self, x: i8, y: i8) -> ViewCell {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return ViewCell::Empty;
        }
        if let Some(active) = self.active {
            let color = active.kind.color_index();
            if active.covers(x, y) {
                return ViewCell::Active(color);
            }
            let settled = self.board[y as usize][x as usize];
            if settled == 0 {
                if let Some(ghost_y) = self.ghost_y {
                    let ghost = ActiveSnapshot {
                        y: ghost_y,
                        ..active
                    };
                    if ghost.covers(x, y) {
                        return ViewCell::Ghost(color);
                    }
                }
            }
        }
        match self.board[y as usize][x as usize] {
            0 => ViewCell::Empty,
            c => ViewCell::Settled(c - 1),
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            score: 0,
            level: 1,
            lines: 0,
            phase: Phase::Idle,
            session_id: 0,
            tick_ms: crate::types::BASE_TICK_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_overlays_piece_without_touching_board() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = 3;
        snap.active = Some(Piece::spawn(PieceKind::O).into());
        snap.ghost_y = Some(18);

        assert_eq!(snap.cell_at(4, 0), ViewCell::Active(1));
        assert_eq!(snap.cell_at(5, 1), ViewCell::Active(1));
        assert_eq!(snap.cell_at(4, 18), ViewCell::Ghost(1));
        assert_eq!(snap.cell_at(0, 19), ViewCell::Settled(2));
        assert_eq!(snap.cell_at(0, 0), ViewCell::Empty);
        assert_eq!(snap.cell_at(-1, 0), ViewCell::Empty);
        assert_eq!(snap.board[0][4], 0);
    }

    #[test]
    fn default_snapshot_is_idle_level_one() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.level, 1);
        assert!(!snap.playable());
    }
}
