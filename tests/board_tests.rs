//! Board tests - grid access, merging and line clearing

use arcade_tetris::core::{Board, Piece};
use arcade_tetris::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

fn full_row(color: u8) -> [Cell; W] {
    [Cell::Filled(color); W]
}

fn marker_row(x: usize, color: u8) -> [Cell; W] {
    let mut row = [Cell::Empty; W];
    row[x] = Cell::Filled(color);
    row
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert!(board.is_empty());

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(Cell::Empty), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_from_rows_rejects_wrong_height() {
    let rows = vec![[Cell::Empty; W]; H - 1];
    assert!(Board::from_rows(&rows).is_none());
}

#[test]
fn test_clear_rows_two_and_five_is_stable() {
    // Full rows at 2 and 5; every other row carries a unique marker.
    let mut rows = vec![[Cell::Empty; W]; H];
    for (y, row) in rows.iter_mut().enumerate() {
        *row = marker_row(y % W, (y % 7) as u8);
    }
    rows[2] = full_row(1);
    rows[5] = full_row(2);
    let mut board = Board::from_rows(&rows).unwrap();

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[5, 2]);

    let expected_survivors: Vec<[Cell; W]> = rows
        .iter()
        .enumerate()
        .filter(|(y, _)| *y != 2 && *y != 5)
        .map(|(_, r)| *r)
        .collect();

    // Two empty rows on top, then the survivors in their original order.
    for y in 0..2 {
        assert!(board.row(y).unwrap().iter().all(|c| c.is_empty()), "row {}", y);
    }
    for (i, expected) in expected_survivors.iter().enumerate() {
        assert_eq!(board.row(i + 2).unwrap(), &expected[..], "row {}", i + 2);
    }
    assert_eq!(board.rows().count(), H);
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut rows = vec![[Cell::Empty; W]; H];
    rows[19] = marker_row(3, 4);
    let mut board = Board::from_rows(&rows).unwrap();
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_merge_writes_color_index() {
    let mut board = Board::new();
    let piece = Piece::new(PieceKind::T, 3, 18);
    board.merge(&piece);

    // T: [0 1 0] / [1 1 1]
    assert_eq!(board.get(4, 18), Some(Cell::Filled(PieceKind::T.color_index())));
    assert_eq!(board.get(3, 19), Some(Cell::Filled(2)));
    assert_eq!(board.get(5, 19), Some(Cell::Filled(2)));
    assert_eq!(board.get(3, 18), Some(Cell::Empty));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_merge_skips_cells_above_board() {
    let mut board = Board::new();
    // O at y = -1: top row is above the board, bottom row lands on row 0.
    let piece = Piece::new(PieceKind::O, 0, -1);
    board.merge(&piece);
    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(0, 0));
    assert!(board.is_occupied(1, 0));
}

#[test]
fn test_is_row_full() {
    let mut rows = vec![[Cell::Empty; W]; H];
    rows[19] = full_row(0);
    rows[18] = full_row(0);
    rows[18][9] = Cell::Empty;
    let board = Board::from_rows(&rows).unwrap();
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(18));
    assert!(!board.is_row_full(0));
}
