//! Arcade Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one name so integration tests, the
//! benches and the binary use `arcade_tetris::{core,input,report,term,types}`.

pub mod cli;
pub mod leaderboard;
pub mod shell;

pub use arcade_tetris_core as core;
pub use arcade_tetris_input as input;
pub use arcade_tetris_report as report;
pub use arcade_tetris_term as term;
pub use arcade_tetris_types as types;
