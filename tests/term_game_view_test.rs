use neon_tetris::core::{Board, GameConfig, GameState, ManualClock, StartOptions};
use neon_tetris::term::game_view::FLASH_MS;
use neon_tetris::term::{AnchorY, FrameBuffer, GameView, Viewport};
use neon_tetris::types::{Phase, PieceKind, BOARD_COLS};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y) + "\n")
        .collect()
}

fn playing(opening: &[PieceKind], board: Option<Board>) -> (GameState<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let mut gs = GameState::with_clock(GameConfig::default(), clock.clone());
    gs.start_game_with(StartOptions {
        skip_countdown: true,
        board,
        opening: opening.to_vec(),
    });
    (gs, clock)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the 10x20 visible field is 20x20,
    // plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╭');
    assert_eq!(fb.get(21, 0).unwrap().ch, '╮');
    assert_eq!(fb.get(0, 21).unwrap().ch, '╰');
    assert_eq!(fb.get(21, 21).unwrap().ch, '╯');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.phase = Phase::Playing;
    snap.board.fill(0, 21, PieceKind::I);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin; board row 21 is the last visible row.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_ghost_on_floor() {
    let (gs, _) = playing(&[PieceKind::I], None);
    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(22, 22));

    // I at x=3 spans columns 3..7 => screen x 7..15 on the bottom row.
    let bottom = fb.row_text(20);
    let expected = format!("│{}{}{}│", "·".repeat(6), "░".repeat(8), "·".repeat(6));
    assert_eq!(bottom, expected);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let (gs, _) = playing(&[], None);
    let mut snap = gs.snapshot();
    snap.stats.score = 1234;
    snap.stats.level = 2;
    snap.stats.lines = 10;
    snap.stats.combo = 3;
    snap.hold = Some(PieceKind::T);

    let view = GameView::default();
    let all = screen_text(&view.render(&snap, Viewport::new(60, 22)));
    for needle in ["SCORE", "1234", "LEVEL", "LINES", "COMBO x3", "HOLD", "NEXT"] {
        assert!(all.contains(needle), "missing {}", needle);
    }

    // No room for a panel.
    let narrow = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_overlays_follow_phase() {
    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    let intro = GameState::new(1).snapshot();
    assert!(screen_text(&view.render(&intro, vp)).contains("NEON TETRIS"));

    let (mut gs, _) = playing(&[], None);
    assert!(!screen_text(&view.render(&gs.snapshot(), vp)).contains("PAUSED"));
    gs.pause_game();
    assert!(screen_text(&view.render(&gs.snapshot(), vp)).contains("PAUSED"));

    let mut over = gs.snapshot();
    over.phase = Phase::Over;
    assert!(screen_text(&view.render(&over, vp)).contains("GAME OVER"));

    let clock = ManualClock::new(0);
    let mut counting = GameState::with_clock(GameConfig::default(), clock.clone());
    counting.start_game(false);
    assert!(screen_text(&view.render(&counting.snapshot(), vp)).contains('3'));
    clock.advance(1_500);
    assert!(screen_text(&view.render(&counting.snapshot(), vp)).contains('1'));
}

#[test]
fn term_view_flashes_cleared_rows_then_fades() {
    let mut board = Board::new();
    for x in 0..BOARD_COLS as i32 {
        if !(3..7).contains(&x) {
            board.fill(x, 21, PieceKind::L);
        }
    }
    let (mut gs, clock) = playing(&[PieceKind::I, PieceKind::O], Some(board));
    gs.hard_drop();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(22, 22);

    let flashing = view.render(&gs.snapshot(), vp);
    let cell = flashing.get(1, 20).unwrap();
    assert_eq!(cell.ch, ' ');
    assert_eq!(cell.style.fg, cell.style.bg);

    clock.advance(FLASH_MS);
    let settled = view.render(&gs.snapshot(), vp);
    assert_eq!(settled.get(1, 20).unwrap().ch, '·');
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '╭');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╭');
}
