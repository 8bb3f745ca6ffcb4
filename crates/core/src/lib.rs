//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and state machine. It has
//! **zero dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: the piece randomizer is injected, so a seed (or a
//!   scripted sequence) reproduces a game exactly
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: renderers and input sources only see snapshots and actions
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of settled cells, merge and line clearing
//! - [`pieces`]: shape matrices and the clockwise rotation transform
//! - [`collision`]: bounds and overlap checks
//! - [`rng`]: injectable piece randomizers
//! - [`scoring`]: line-clear points, level and gravity period
//! - [`engine`]: the game state machine
//! - [`timer`]: cancellable gravity scheduler
//! - [`session`]: engine + timer, the automatic tick path
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at (4, 0), chosen uniformly among the seven kinds
//! - Rotation is clockwise only and is rejected outright on collision (no wall kicks)
//! - A piece that cannot fall locks on the next tick; hard drop locks at once
//! - Clearing n rows scores `n * 100 * level`; `level = score / 1000 + 1`
//! - Gravity runs every `max(200, 800 - (level - 1) * 100)` ms
//! - A spawn that overlaps settled cells ends the game
//!
//! # Example
//!
//! ```
//! use arcade_tetris_core::GameEngine;
//! use arcade_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameEngine::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert_eq!(game.score(), 0); // nothing cleared yet
//! ```

pub mod board;
pub mod collision;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use arcade_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, piece_collides};
pub use engine::GameEngine;
pub use pieces::{get_shape, Piece, Shape, SPAWN_POSITION};
pub use rng::{PieceRandomizer, SequenceRandomizer, UniformRandomizer};
pub use scoring::{apply_line_clear, level_for_score, line_clear_score, tick_period_ms, ScoreResult};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot, ViewCell};
pub use timer::GravityTimer;
