//! Rendering a live session through the terminal layer, headless

use tui_match3::core::{BuiltinLevels, GameSnapshot, PlaySession};
use tui_match3::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};
use tui_match3::types::{Coord, Direction, UiAction};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn test_session_renders_board_and_hud() {
    let session = PlaySession::new(BuiltinLevels, 1, 0xACE1).unwrap();
    let view = GameView::default();
    let viewport = Viewport::new(80, 32);
    let mut fb = FrameBuffer::new(0, 0);
    let hud = HudView {
        total_score: 0,
        message: Some("Combo x2!"),
        has_next_level: true,
    };

    view.render_into_with_hud(&session.snapshot(), Some(&hud), viewport, &mut fb);

    let text = screen_text(&fb);
    assert!(text.contains("LEVEL"));
    assert!(text.contains("JELLY"));
    assert!(text.contains("13"));
    assert!(text.contains("Combo x2!"));
    assert!(text.contains("space: select"));

    let (x, y) = view.cell_origin(viewport, session.cursor());
    assert_eq!(fb.get(x, y).unwrap().ch, '[');
}

#[test]
fn test_cursor_move_redraws_as_a_small_diff() {
    let mut session = PlaySession::new(BuiltinLevels, 1, 0xACE1).unwrap();
    let view = GameView::default();
    let viewport = Viewport::new(80, 32);
    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    session.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.last_frame_bytes();

    session.apply_action(UiAction::Move(Direction::Left)).unwrap();
    assert_eq!(session.cursor(), Coord::new(3, 4));
    session.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let diff = renderer.last_frame_bytes();

    assert!(diff > 0);
    assert!(diff < full / 4, "diff {} vs full {}", diff, full);

    // Nothing changed: nothing to send.
    view.render_into(&snap, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    assert_eq!(renderer.last_frame_bytes(), 0);
}
