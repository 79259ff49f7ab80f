//! Game state tests - lifecycle scenarios driven through the public API

use neon_tetris::core::{Board, GameConfig, GameState, ManualClock, StartOptions};
use neon_tetris::types::{
    Direction, GameAction, Phase, PieceKind, RotateDir, BOARD_COLS, BOARD_ROWS, COUNTDOWN_MS,
};

fn new_game() -> (GameState<ManualClock>, ManualClock) {
    let clock = ManualClock::new(10_000);
    let config = GameConfig::default().with_seed(12345);
    (GameState::with_clock(config, clock.clone()), clock)
}

fn start_with(state: &mut GameState<ManualClock>, board: Option<Board>, opening: &[PieceKind]) {
    state.start_game_with(StartOptions {
        skip_countdown: true,
        board,
        opening: opening.to_vec(),
    });
}

#[test]
fn test_game_lifecycle() {
    let (mut state, clock) = new_game();
    assert_eq!(state.phase(), Phase::Intro);
    assert!(state.active().is_none());

    state.start_game(false);
    assert_eq!(state.phase(), Phase::Countdown);
    assert!(state.active().is_some());

    clock.advance(COUNTDOWN_MS);
    state.tick(16);
    assert_eq!(state.phase(), Phase::Playing);

    assert!(state.pause_game());
    assert!(state.resume_game());

    state.reset_game();
    assert_eq!(state.phase(), Phase::Intro);
    assert!(state.active().is_none());
    assert!(state.hold_piece_kind().is_none());
    assert!(state.recent_effect().is_none());
    assert_eq!(state.countdown_until(), None);
}

#[test]
fn test_single_row_clear_scores_125() {
    let mut board = Board::new();
    for x in 0..BOARD_COLS as i32 {
        if x < 3 || x > 6 {
            board.fill(x, 21, PieceKind::J);
        }
    }
    let (mut state, _) = new_game();
    start_with(&mut state, Some(board), &[PieceKind::I]);

    assert!(state.hard_drop());
    let stats = state.stats();
    assert_eq!(stats.lines, 1);
    assert_eq!(stats.combo, 1);
    assert_eq!(stats.score, 125);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.recent_effect().map(|e| e.rows.to_vec()), Some(vec![21]));
}

#[test]
fn test_effect_ids_increase() {
    let mut board = Board::new();
    for y in [20, 21] {
        for x in 0..BOARD_COLS as i32 {
            if x < 3 || x > 6 {
                board.fill(x, y, PieceKind::J);
            }
        }
    }
    let (mut state, clock) = new_game();
    start_with(&mut state, Some(board), &[PieceKind::I, PieceKind::I]);

    state.hard_drop();
    let first = state.recent_effect().map(|e| e.id).unwrap();
    clock.advance(5);
    state.hard_drop();
    let second = state.recent_effect().unwrap();
    assert!(second.id > first);
    assert_eq!(state.stats().combo, 2);
    // 100 + 25, then 100 + 2*25.
    assert_eq!(state.stats().score, 125 + 150);
}

#[test]
fn test_spawn_into_filled_board_tops_out() {
    let mut board = Board::new();
    for y in 0..BOARD_ROWS as i32 {
        for x in 0..BOARD_COLS as i32 {
            if (x + y) % 2 == 0 {
                board.fill(x, y, PieceKind::O);
            }
        }
    }
    let (mut state, _) = new_game();
    start_with(&mut state, Some(board), &[]);
    assert_eq!(state.phase(), Phase::Over);
    assert!(state.active().is_none());
    assert!(state.snapshot().ghost_y.is_none());

    // Input is ignored until restarted.
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.phase(), Phase::Countdown);
}

#[test]
fn test_hold_twice_in_a_row_is_ignored() {
    let (mut state, _) = new_game();
    start_with(&mut state, None, &[PieceKind::S, PieceKind::Z]);

    assert!(state.hold_piece());
    let after_first = state.snapshot();
    assert!(!state.hold_piece());
    assert_eq!(state.snapshot(), after_first);
    assert_eq!(state.hold_piece_kind(), Some(PieceKind::S));
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::Z));
}

#[test]
fn test_hold_swap_into_blocked_spawn_tops_out() {
    // Columns 2-3 stacked from row 2 down; rows 0-1 stay open.
    let mut board = Board::new();
    for y in 2..BOARD_ROWS as i32 {
        board.fill(2, y, PieceKind::J);
        board.fill(3, y, PieceKind::J);
    }
    let (mut state, _) = new_game();
    start_with(&mut state, Some(board), &[PieceKind::I, PieceKind::O, PieceKind::O]);

    assert!(state.hold_piece());
    assert_eq!(state.hold_piece_kind(), Some(PieceKind::I));

    // Park the O on top of the stack, covering the I's spawn cells.
    assert!(state.move_piece(Direction::Left));
    assert!(state.move_piece(Direction::Left));
    assert!(state.hard_drop());
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::O));

    assert!(state.hold_piece());
    assert_eq!(state.phase(), Phase::Over);
    assert!(state.active().is_none());
    assert_eq!(state.hold_piece_kind(), Some(PieceKind::O));
}

#[test]
fn test_custom_countdown_length() {
    let clock = ManualClock::new(0);
    let config = GameConfig::default().with_countdown_ms(500);
    let mut state = GameState::with_clock(config, clock.clone());

    state.start_game(false);
    assert_eq!(state.countdown_until(), Some(500));

    clock.advance(499);
    state.tick(16);
    assert_eq!(state.phase(), Phase::Countdown);

    clock.advance(1);
    state.tick(16);
    assert_eq!(state.phase(), Phase::Playing);
}

#[test]
fn test_countdown_ticks_do_not_move_piece() {
    let (mut state, clock) = new_game();
    state.start_game(false);
    let before = state.active();

    for _ in 0..100 {
        clock.advance(10);
        state.tick(50);
    }
    assert_eq!(state.phase(), Phase::Countdown);
    assert_eq!(state.active(), before);
    assert_eq!(state.drop_accumulator_ms(), 0);
    assert_eq!(state.countdown_remaining_ms(), Some(COUNTDOWN_MS - 1_000));
}

#[test]
fn test_ghost_matches_active_resting_row() {
    let (mut state, _) = new_game();
    start_with(&mut state, None, &[]);
    for step in 0..30 {
        let active = state.active().unwrap();
        let ghost_y = state.ghost_y().unwrap();
        let resting = active.translated(0, ghost_y - active.y);
        assert!(resting.fits(state.board()));
        assert!(resting.translated(0, 1).cells().any(|(x, y)| {
            y >= BOARD_ROWS as i32 || state.board().is_occupied(x, y)
        }));

        match step % 3 {
            0 => state.move_piece(Direction::Left),
            1 => state.rotate(RotateDir::Cw),
            _ => state.hard_drop(),
        };
        if state.phase() == Phase::Over {
            break;
        }
    }
}

#[test]
fn test_score_never_decreases() {
    let (mut state, _) = new_game();
    start_with(&mut state, None, &[]);
    let mut last = 0;
    let dirs = [Direction::Left, Direction::Right];
    for i in 0..300 {
        for _ in 0..(i % 5) {
            state.move_piece(dirs[i % 2]);
        }
        state.hard_drop();
        assert!(state.score() >= last);
        last = state.score();
        if state.phase() == Phase::Over {
            state.start_game(true);
            last = 0;
        }
    }
}

#[test]
fn test_no_active_piece_overlaps_locked_cells() {
    let (mut state, _) = new_game();
    start_with(&mut state, None, &[]);
    for i in 0..200 {
        match i % 4 {
            0 => state.apply_action(GameAction::RotateCcw),
            1 => state.apply_action(GameAction::MoveRight),
            2 => state.tick(1_000),
            _ => state.apply_action(GameAction::HardDrop),
        };
        if let Some(active) = state.active() {
            assert!(active.fits(state.board()));
        }
        if state.phase() == Phase::Over {
            break;
        }
    }
}
