//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! | Tile | Glyph |
//! |------|-------|
//! | plain | `●` |
//! | vertical striped | `┃` |
//! | horizontal striped | `━` |
//! | wrapped | `▣` |
//! | colourbomb | `✱` |
//! | swirl | `@` |
//!
//! Jelly tints the cell background (two layers darker than one), cages draw a
//! `#` beside the candy, holes are left black.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Background, Coord, Tile, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session-level information shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView<'a> {
    pub total_score: u64,
    /// Short-lived status line (combo, reshuffle, ...)
    pub message: Option<&'a str>,
    pub has_next_level: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 keeps cells roughly square and leaves room for the cage marker.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const JELLY_1_BG: Rgb = Rgb::new(70, 45, 70);
const JELLY_2_BG: Rgb = Rgb::new(110, 55, 105);
const CAGE_FG: Rgb = Rgb::new(170, 170, 190);

const CANDY_COLORS: [Rgb; 6] = [
    Rgb::new(230, 70, 70),
    Rgb::new(255, 160, 40),
    Rgb::new(240, 220, 80),
    Rgb::new(100, 210, 110),
    Rgb::new(80, 140, 240),
    Rgb::new(190, 110, 230),
];

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Framebuffer position of board cell `c` (top-left column, row).
    pub fn cell_origin(&self, viewport: Viewport, c: Coord) -> (u16, u16) {
        let (start_x, start_y, _, _) = self.frame_rect(viewport);
        (
            start_x + 1 + c.x as u16 * self.cell_w,
            start_y + 1 + c.y as u16 * self.cell_h,
        )
    }

    fn frame_rect(&self, viewport: Viewport) -> (u16, u16, u16, u16) {
        let frame_w = GRID_SIZE as u16 * self.cell_w + 2;
        let frame_h = GRID_SIZE as u16 * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x, start_y, frame_w, frame_h)
    }

    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_hud(snap, None, viewport, fb);
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Allocation-free once the framebuffer has reached the viewport size.
    pub fn render_into_with_hud(
        &self,
        snap: &GameSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (start_x, start_y, frame_w, frame_h) = self.frame_rect(viewport);
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK),
        );

        for c in Coord::all() {
            self.draw_cell(fb, viewport, snap, c);
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x + frame_w + 2, start_y);

        if snap.won {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "LEVEL COMPLETE");
        } else if snap.lost {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "OUT OF MOVES");
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, viewport: Viewport, snap: &GameSnapshot, c: Coord) {
        let bg = Background::from_code(snap.background_at(c));
        let tile = Tile::from_code(snap.tile_at(c)).unwrap_or(Tile::Empty);

        let mut back = match bg.jelly {
            _ if bg.is_hole() => Rgb::BLACK,
            2 => JELLY_2_BG,
            1 => JELLY_1_BG,
            _ => BOARD_BG,
        };
        let is_cursor = snap.cursor == Some(c);
        if is_cursor {
            back = if snap.selected {
                Rgb::new(200, 180, 40)
            } else {
                Rgb::new(90, 90, 110)
            };
        }

        let (ox, oy) = self.cell_origin(viewport, c);
        fb.fill_rect(ox, oy, self.cell_w, self.cell_h, ' ', CellStyle::new(Rgb::WHITE, back));

        let (glyph, fg) = match tile {
            Tile::Color(k) => ('●', CANDY_COLORS[k as usize % 6]),
            Tile::StripedV(k) => ('┃', CANDY_COLORS[k as usize % 6]),
            Tile::StripedH(k) => ('━', CANDY_COLORS[k as usize % 6]),
            Tile::Wrapped(k) => ('▣', CANDY_COLORS[k as usize % 6]),
            Tile::Colorbomb => ('✱', Rgb::WHITE),
            Tile::Swirl => ('@', Rgb::new(150, 120, 90)),
            Tile::Cage => ('#', CAGE_FG),
            Tile::Empty if bg.is_hole() => (' ', Rgb::BLACK),
            Tile::Empty => ('·', Rgb::new(90, 90, 100)),
        };

        let mid = ox + self.cell_w / 2;
        let mut style = CellStyle::new(fg, back);
        if tile.is_special() {
            style = style.bold();
        }
        fb.put_char(mid, oy, glyph, style);

        if bg.cage && self.cell_w >= 2 {
            fb.put_char(ox, oy, '#', CellStyle::new(CAGE_FG, back).bold());
        }
        if is_cursor && self.cell_w >= 3 {
            let marks = CellStyle::new(Rgb::WHITE, back).bold();
            fb.put_char(ox, oy, '[', marks);
            fb.put_char(ox + self.cell_w - 1, oy, ']', marks);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = start_y;
        let mut row = |fb: &mut FrameBuffer, name: &str, n: u64| {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, n, value);
            y += 3;
        };
        row(fb, "LEVEL", u64::from(snap.level));
        row(fb, "SCORE", snap.score);
        row(fb, "MOVES", u64::from(snap.moves_remaining));
        row(fb, "JELLY", u64::from(snap.jelly_remaining));

        let Some(hud) = hud else { return };
        if hud.total_score != snap.score {
            row(fb, "TOTAL", hud.total_score);
        }
        if let Some(message) = hud.message {
            fb.put_str(panel_x, y, message, CellStyle::new(Rgb::new(255, 220, 120), Rgb::BLACK).bold());
        }
        let help = if snap.won && hud.has_next_level {
            "n: next level"
        } else if snap.finished() {
            "r: retry"
        } else {
            "space: select"
        };
        fb.put_str(panel_x, y + 2, help, value.dim());
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let y = start_y.saturating_add(frame_h / 2);
        fb.put_str(x, y, text, CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold());
    }
}

const PANEL_W: u16 = 16;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COLOURBOMB_TILE, EMPTY_TILE};

    fn snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        for (y, row) in snap.tiles.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = ((x + y) % 6) as u8;
            }
        }
        snap.moves_remaining = 12;
        snap.jelly_remaining = 3;
        snap.score = 450;
        snap.level = 1;
        snap
    }

    #[test]
    fn board_cells_show_candy_glyphs() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 20);
        let mut snap = snapshot();
        snap.tiles[2][3] = COLOURBOMB_TILE;
        let fb = view.render(&snap, viewport);

        let (ox, oy) = view.cell_origin(viewport, Coord::new(0, 0));
        assert_eq!(fb.get(ox + 1, oy).unwrap().ch, '●');
        let (bx, by) = view.cell_origin(viewport, Coord::new(3, 2));
        assert_eq!(fb.get(bx + 1, by).unwrap().ch, '✱');
        assert!(fb.get(bx + 1, by).unwrap().style.bold);
    }

    #[test]
    fn holes_are_black_and_cages_marked() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 20);
        let mut snap = snapshot();
        snap.tiles[0][0] = EMPTY_TILE;
        snap.background[0][0] = Background::HOLE.to_code();
        snap.background[4][4] = Background { jelly: 0, cage: true, swirl: false }.to_code();
        let fb = view.render(&snap, viewport);

        let (hx, hy) = view.cell_origin(viewport, Coord::new(0, 0));
        let hole = fb.get(hx + 1, hy).unwrap();
        assert_eq!(hole.ch, ' ');
        assert_eq!(hole.style.bg, Rgb::BLACK);

        let (cx, cy) = view.cell_origin(viewport, Coord::new(4, 4));
        assert_eq!(fb.get(cx, cy).unwrap().ch, '#');
    }

    #[test]
    fn cursor_is_bracketed() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 20);
        let mut snap = snapshot();
        snap.cursor = Some(Coord::new(5, 6));
        let fb = view.render(&snap, viewport);
        let (x, y) = view.cell_origin(viewport, Coord::new(5, 6));
        assert_eq!(fb.get(x, y).unwrap().ch, '[');
        assert_eq!(fb.get(x + 2, y).unwrap().ch, ']');
    }

    #[test]
    fn panel_shows_counters() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let viewport = Viewport::new(60, 20);
        let fb = view.render(&snapshot(), viewport);
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("450"));
        assert!(text.contains("MOVES"));
        assert!(text.contains("12"));
    }

    #[test]
    fn finished_level_overlay() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 20);
        let mut snap = snapshot();
        snap.lost = true;
        let fb = view.render(&snap, viewport);
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("OUT OF MOVES"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
