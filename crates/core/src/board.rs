//! Board module - the grid of settled cells
//!
//! The board is a 10x20 grid where each cell is empty or filled with a color index.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The board only changes through [`Board::merge`] and [`Board::clear_full_rows`],
//! both of which the engine runs back to back when a piece locks.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear, bottom to top.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Build a board from 20 rows of 10 cells, top row first.
    ///
    /// Returns `None` when the dimensions are wrong.
    pub fn from_rows(rows: &[[Cell; BOARD_WIDTH as usize]]) -> Option<Self> {
        if rows.len() != BOARD_HEIGHT as usize {
            return None;
        }
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            board.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(row);
        }
        Some(board)
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(Cell::is_filled))
            .unwrap_or(false)
    }

    /// One row of cells, or None if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Remove every full row and prepend as many empty rows at the top.
    ///
    /// Non-full rows keep their relative order. Returns the indices (in the
    /// pre-clear board) of the removed rows, sorted bottom to top.
    /// Uses a two-pointer compaction with zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Everything above the write pointer becomes the prepended empty rows
        self.cells[..write_y * width].fill(Cell::Empty);

        cleared_rows
    }

    /// Write a piece's occupied sub-cells into the board.
    ///
    /// Sub-cells above the board (negative y) are skipped. Callers must have
    /// checked the piece with [`crate::collides`] first; anything else out of
    /// range is a contract violation.
    pub fn merge(&mut self, piece: &Piece) {
        let fill = Cell::Filled(piece.color_index());
        for (x, y) in piece.cells() {
            if y < 0 {
                continue;
            }
            let written = self.set(x, y, fill);
            debug_assert!(written, "merge outside the board at ({x}, {y})");
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Write the grid as color codes (0 = empty, 1..=7 = color index + 1).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, c) in dst.iter_mut().zip(src) {
                *d = c.color_index().map(|i| i + 1).unwrap_or(0);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const EMPTY_ROW: [Cell; BOARD_WIDTH as usize] = [Cell::Empty; BOARD_WIDTH as usize];

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_from_rows_rejects_wrong_height() {
        assert!(Board::from_rows(&[EMPTY_ROW; 19]).is_none());
        assert!(Board::from_rows(&[EMPTY_ROW; 20]).is_some());
    }

    #[test]
    fn test_merge_skips_rows_above_board() {
        let mut board = Board::new();
        // Vertical I hanging two rows above the top edge.
        let piece = Piece::new(PieceKind::I, 3, -2).rotated_cw();
        board.merge(&piece);

        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(3, 0), Some(Cell::Filled(0)));
        assert_eq!(board.get(3, 1), Some(Cell::Filled(0)));
    }

    #[test]
    fn test_clear_returns_bottom_to_top_indices() {
        let mut rows = [EMPTY_ROW; BOARD_HEIGHT as usize];
        rows[7] = [Cell::Filled(1); BOARD_WIDTH as usize];
        rows[19] = [Cell::Filled(1); BOARD_WIDTH as usize];
        let mut board = Board::from_rows(&rows).unwrap();

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 7]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_write_u8_grid_offsets_color() {
        let mut board = Board::new();
        board.set(2, 19, Cell::Filled(0));
        board.set(3, 19, Cell::Filled(6));

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][2], 1);
        assert_eq!(grid[19][3], 7);
        assert_eq!(grid[0][0], 0);
    }
}
