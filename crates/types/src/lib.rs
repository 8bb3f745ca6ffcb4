//! Shared types and constants for the falling-block engine.
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! input mapper, the renderer and the leaderboard client can all agree on
//! the same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (4, 0), top-left corner of the piece matrix
//!
//! # Gravity
//!
//! The tick period shrinks by 100ms per level and never goes below 200ms:
//!
//! | Level | Period |
//! |-------|--------|
//! | 1 | 800ms |
//! | 2 | 700ms |
//! | 3 | 600ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 300ms |
//! | 7+ | 200ms |
//!
//! # Examples
//!
//! ```
//! use arcade_tetris_types::{PieceKind, GameAction, Cell, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color_index(), 2);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert!(Cell::Filled(2).is_filled());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn anchor (top-left of the piece matrix)
pub const SPAWN_X: i8 = 4;

/// Row of the spawn anchor
pub const SPAWN_Y: i8 = 0;

/// Tick period at level 1
pub const BASE_TICK_MS: u32 = 800;

/// Period reduction per level above 1
pub const TICK_STEP_MS: u32 = 100;

/// Fastest gravity the engine will ever run at
pub const MIN_TICK_MS: u32 = 200;

/// Points per cleared line, multiplied by the current level
pub const POINTS_PER_LINE: u32 = 100;

/// Score needed per level step (`level = score / 1000 + 1`)
pub const SCORE_PER_LEVEL: u32 = 1000;

/// Longest accepted player name, in characters
pub const MAX_PLAYER_NAME_LEN: usize = 20;

/// Game identifier used on the leaderboard
pub const GAME_ID: &str = "tetris";

/// The seven piece kinds, in canonical order.
///
/// The discriminant doubles as the color index: I=0, O=1, T=2, L=3, J=4,
/// S=5, Z=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in canonical (color index) order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Color index of this kind (0..=6).
    pub fn color_index(&self) -> u8 {
        *self as u8
    }

    /// Look up a kind by its color index.
    ///
    /// ```
    /// use arcade_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// A cell on the game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Settled cell carrying the color index of the piece that locked here.
    Filled(u8),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Color index for filled cells.
    pub fn color_index(&self) -> Option<u8> {
        match self {
            Cell::Empty => None,
            Cell::Filled(c) => Some(*c),
        }
    }
}

/// Lifecycle of one game session.
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`, and
/// `GameOver -> Running` again on restart. The block-stacking game has no
/// win state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Commands the engine understands.
///
/// Input sources translate their own events into these; the engine applies
/// them under the collision rules and drops them outside `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One gravity step on demand
    SoftDrop,
    /// Drop as far as possible and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Toggle between running and paused
    TogglePause,
    /// Start a new session (from idle or after game over)
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use arcade_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }

    /// Actions that only make sense while a piece is falling.
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, GameAction::TogglePause | GameAction::Start)
    }
}

/// Event emitted after a piece locks.
///
/// Observers (renderer, logs) read it once via the engine's
/// `take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    pub level_up: bool,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_constants_match_level_table() {
        assert_eq!(BASE_TICK_MS, 800);
        assert_eq!(TICK_STEP_MS, 100);
        assert_eq!(MIN_TICK_MS, 200);
        assert_eq!(POINTS_PER_LINE, 100);
        assert_eq!(SCORE_PER_LEVEL, 1000);
    }

    #[test]
    fn color_index_roundtrips_through_from_index() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_index() as usize, i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
        }
    }

    #[test]
    fn only_movement_actions_are_gameplay() {
        assert!(GameAction::Rotate.is_gameplay());
        assert!(GameAction::HardDrop.is_gameplay());
        assert!(!GameAction::TogglePause.is_gameplay());
        assert!(!GameAction::Start.is_gameplay());
    }
}
