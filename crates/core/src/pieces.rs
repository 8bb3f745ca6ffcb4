//! Pieces module - shape matrices and the rotation transform
//!
//! Each piece is a small boolean matrix anchored by its top-left corner.
//! Rotation is the plain matrix transform (transpose, then reverse every
//! row). There are no wall kicks: the engine simply rejects a rotated
//! matrix that collides.

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Boolean sub-cell matrix of a piece.
///
/// Only the `height x width` top-left corner of `cells` is meaningful; the
/// rest is always `false` so that derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from a 0/1 grid (row-major, top row first).
    pub const fn from_grid(width: u8, height: u8, grid: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < height as usize {
            let mut x = 0;
            while x < width as usize {
                cells[y][x] = grid[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the sub-cell at column `x`, row `y` is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.cells[y][x]
    }

    /// Occupied sub-cells as (x, y) offsets from the anchor, row by row
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then reverse each resulting row.
    pub fn rotate_cw(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        // The rotated matrix is h wide and w tall.
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const I_SHAPE: Shape = Shape::from_grid(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = Shape::from_grid(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::from_grid(3, 2, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::from_grid(3, 2, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::from_grid(3, 2, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::from_grid(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::from_grid(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Spawn-orientation shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// A piece on the board: kind, current matrix and anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Piece of `kind` in spawn orientation at an arbitrary anchor
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            x,
            y,
        }
    }

    /// Piece of `kind` at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }

    /// Occupied sub-cells in board coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece shifted by (dx, dy)
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece with its matrix rotated clockwise; the anchor is kept
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..*self
        }
    }
}
