//! Input module (engine-facing).
//!
//! Maps `crossterm` key events into [`InputEvent`]s and gates them by game
//! phase before they reach the session. The mapping is pure; nothing here
//! mutates the board or the piece directly. [`NameEntry`] is the small text
//! field used to enter a player name after game over.

pub mod map;
pub mod mapper;
pub mod name_entry;

pub use arcade_tetris_core as core;
pub use arcade_tetris_types as types;

pub use map::{handle_key_event, should_quit, InputEvent};
pub use mapper::{apply_event, command_for};
pub use name_entry::{NameEntry, NameEntryOutcome};
