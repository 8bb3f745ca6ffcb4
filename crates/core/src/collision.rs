//! Collision checks between a shape at an anchor and the board.
//!
//! Rows above the board (negative y) only collide with the side walls, never
//! with settled cells. That lets a piece hang partially above the top edge
//! while a spawn onto settled cells at y >= 0 still counts as blocked.

use crate::board::Board;
use crate::pieces::{Piece, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if `shape` anchored at (`x`, `y`) hits a wall, the floor or a filled cell.
pub fn collides(shape: &Shape, x: i8, y: i8, board: &Board) -> bool {
    shape.offsets().any(|(dx, dy)| {
        let bx = x as i16 + dx as i16;
        let by = y as i16 + dy as i16;
        if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
            return true;
        }
        by >= 0 && board.is_occupied(bx as i8, by as i8)
    })
}

/// [`collides`] for a piece at its own anchor
pub fn piece_collides(piece: &Piece, board: &Board) -> bool {
    collides(&piece.shape, piece.x, piece.y, board)
}
