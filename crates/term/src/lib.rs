//! Terminal renderer for the block-stacking game.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer of styled
//! cells, then flushes it through crossterm with diffed redraws. Widgets and
//! layout engines are not used; each board cell is two columns wide to keep
//! blocks roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use arcade_tetris_core as core;
pub use arcade_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, ReportStatusView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
