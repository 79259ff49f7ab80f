//! Board tests - grid access, placement, merge and sweep

use neon_tetris::core::{shape, ActivePiece, Board};
use neon_tetris::types::{PieceKind, BOARD_COLS, BOARD_ROWS};

fn fill_row(board: &mut Board, y: i32, except: &[i32]) {
    for x in 0..BOARD_COLS as i32 {
        if !except.contains(&x) {
            board.fill(x, y, PieceKind::Z);
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_COLS);
    assert_eq!(board.height(), BOARD_ROWS);

    for y in 0..BOARD_ROWS as i32 {
        for x in 0..BOARD_COLS as i32 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {}) should be empty", x, y);
        }
    }
    assert_eq!(board.rows().count(), BOARD_ROWS);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_COLS as i32, 0), None);
    assert_eq!(board.get(0, BOARD_ROWS as i32), None);
}

#[test]
fn test_board_set_and_clear() {
    let mut board = Board::new();
    assert!(board.fill(5, 10, PieceKind::T));
    assert!(board.is_occupied(5, 10));
    assert_eq!(board.get(5, 10).flatten().map(|c| c.kind), Some(PieceKind::T));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));
    assert!(!board.fill(-1, 0, PieceKind::T));
    assert!(!board.set(0, BOARD_ROWS as i32, None));
}

#[test]
fn test_can_place_walls_floor_and_sky() {
    let board = Board::new();
    let i_flat = shape(PieceKind::I).matrix(0);

    // I spawn row is matrix row 1.
    assert!(board.can_place(i_flat, 0, 0));
    assert!(board.can_place(i_flat, 6, 0));
    assert!(!board.can_place(i_flat, -1, 0));
    assert!(!board.can_place(i_flat, 7, 0));

    // Lowest legal row puts the minos on row 21.
    assert!(board.can_place(i_flat, 3, 20));
    assert!(!board.can_place(i_flat, 3, 21));

    // Above the top edge is always free.
    assert!(board.can_place(i_flat, 3, -3));
}

#[test]
fn test_can_place_collides_with_locked_cells() {
    let mut board = Board::new();
    board.fill(4, 21, PieceKind::S);
    let o = shape(PieceKind::O).matrix(0);
    assert!(!board.can_place(o, 4, 20));
    assert!(!board.can_place(o, 3, 20));
    assert!(board.can_place(o, 5, 20));
    assert!(board.can_place(o, 4, 19));
}

#[test]
fn test_merge_is_pure_and_drops_sky_cells() {
    let board = Board::new();
    let piece = ActivePiece {
        y: -1,
        ..ActivePiece::spawn(PieceKind::O)
    };
    let merged = board.merge(&piece, 77);

    assert_eq!(board.filled_count(), 0);
    assert_eq!(merged.filled_count(), 2);
    for x in 4..6 {
        let cell = merged.get(x, 0).flatten().unwrap();
        assert_eq!(cell.kind, PieceKind::O);
        assert_eq!(cell.locked_at, 77);
        assert_eq!(cell.glow, 1.0);
    }
}

#[test]
fn test_merge_assigns_unique_ids() {
    let mut board = Board::new();
    for (i, kind) in [PieceKind::O, PieceKind::I, PieceKind::T].into_iter().enumerate() {
        let piece = ActivePiece::spawn(kind).translated(0, 6 * i as i32);
        board = board.merge(&piece, 0);
    }
    let mut ids: Vec<u64> = board.cells().iter().flatten().map(|c| c.id).collect();
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(n, 12);
    assert_eq!(ids.len(), n);
}

#[test]
fn test_sweep_no_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 21, &[3]);
    let sweep = board.sweep_lines();
    assert!(sweep.cleared.is_empty());
    assert_eq!(sweep.board, board);
}

#[test]
fn test_sweep_removes_rows_and_shifts_down() {
    let mut board = Board::new();
    fill_row(&mut board, 21, &[]);
    fill_row(&mut board, 20, &[0]);
    fill_row(&mut board, 19, &[]);
    board.fill(7, 18, PieceKind::L);

    let sweep = board.sweep_lines();
    assert_eq!(sweep.cleared.as_slice(), &[19, 21]);

    // Partial row 20 lands on the floor, the lone L lands above it.
    assert!(!sweep.board.is_occupied(0, 21));
    assert!(sweep.board.is_occupied(1, 21));
    assert!(sweep.board.is_occupied(7, 20));
    assert_eq!(sweep.board.filled_count(), 9 + 1);

    // Row count is preserved and the top is padded with empty rows.
    assert_eq!(sweep.board.rows().count(), BOARD_ROWS);
    assert!(sweep.board.row(0).iter().all(|c| c.is_none()));
    assert!(sweep.board.row(1).iter().all(|c| c.is_none()));
}

#[test]
fn test_sweep_four_rows() {
    let mut board = Board::new();
    for y in 18..22 {
        fill_row(&mut board, y, &[]);
    }
    let sweep = board.sweep_lines();
    assert_eq!(sweep.cleared.as_slice(), &[18, 19, 20, 21]);
    assert_eq!(sweep.board.filled_count(), 0);
}
