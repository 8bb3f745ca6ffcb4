//! Piece shape and rotation tests

use arcade_tetris::core::{collides, get_shape, Board, Piece, SPAWN_POSITION};
use arcade_tetris::types::PieceKind;

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(back, shape, "{:?}", kind);
    }
}

#[test]
fn test_every_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.offsets().count(), 4, "{:?}", kind);
        assert_eq!(shape.rotate_cw().offsets().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_rotation_swaps_dimensions() {
    let i = get_shape(PieceKind::I);
    assert_eq!((i.width(), i.height()), (4, 1));
    let r = i.rotate_cw();
    assert_eq!((r.width(), r.height()), (1, 4));

    let t = get_shape(PieceKind::T);
    let r = t.rotate_cw();
    assert_eq!((r.width(), r.height()), (2, 3));
}

#[test]
fn test_t_rotates_clockwise() {
    // [0 1 0]      [1 0]
    // [1 1 1]  ->  [1 1]
    //              [1 0]
    let r = get_shape(PieceKind::T).rotate_cw();
    let cells: Vec<(i8, i8)> = r.offsets().collect();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (0, 2)]);
}

#[test]
fn test_o_rotation_is_unchanged() {
    let o = get_shape(PieceKind::O);
    assert_eq!(o.rotate_cw(), o);
}

#[test]
fn test_spawn_position_and_color() {
    assert_eq!(SPAWN_POSITION, (4, 0));
    for (i, kind) in PieceKind::ALL.iter().enumerate() {
        let piece = Piece::spawn(*kind);
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(piece.color_index() as usize, i);
        assert!(!collides(&piece.shape, piece.x, piece.y, &Board::new()));
    }
}
