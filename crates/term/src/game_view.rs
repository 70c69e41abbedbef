//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure, no I/O. Only the visible rows are drawn; the header rows above
//! them stay hidden, so a freshly spawned piece slides into view.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, Rotation, BOARD_WIDTH, HEADER_ROWS, VISIBLE_ROWS};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the well interior in framebuffer coordinates
#[derive(Debug, Clone, Copy)]
struct Well {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into a reused framebuffer, resizing it to `viewport`
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let w = BOARD_WIDTH as u16 * self.cell_w;
        let h = VISIBLE_ROWS as u16;
        let well = Well {
            x: viewport.width.saturating_sub(w + 2) / 2 + 1,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h + 2) / 2 + 1,
                AnchorY::Top => 1,
            },
            w,
            h,
        };

        fb.fill_rect(well.x, well.y, w, h, Glyph::new(' ', Style::default().on(WELL_BG)));
        fb.draw_frame(well.x, well.y, w, h, Style::fg(Rgb::new(200, 200, 200)));

        let dot = Style::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim();
        for (y, row) in snap.board.iter().enumerate().skip(HEADER_ROWS as usize) {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.draw_cell(fb, well, x as i8, y as i8, '█', block_style(kind)),
                    None => self.draw_cell(fb, well, x as i8, y as i8, '·', dot),
                }
            }
        }

        if let Some(active) = snap.active {
            let style = block_style(active.kind).bold();
            for (dx, dy) in get_shape(active.kind, active.rotation) {
                self.draw_cell(fb, well, active.x + dx, active.y + dy, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, well);

        if snap.game_over {
            draw_banner(fb, well, "GAME OVER");
        } else if snap.paused {
            draw_banner(fb, well, "PAUSED");
        }
    }

    /// Allocating convenience wrapper around [`Self::render_into`]
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Draw board cell (x, y); header rows and out-of-grid cells are skipped
    fn draw_cell(&self, fb: &mut FrameBuffer, well: Well, x: i8, y: i8, ch: char, style: Style) {
        let row = y - HEADER_ROWS as i8;
        if x < 0 || x >= BOARD_WIDTH as i8 || row < 0 || row >= VISIBLE_ROWS as i8 {
            return;
        }
        let px = well.x + x as u16 * self.cell_w;
        let py = well.y + row as u16;
        fb.fill_rect(px, py, self.cell_w, 1, Glyph::new(ch, style));
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, well: Well) {
        let x = well.x.saturating_add(well.w).saturating_add(3);
        if viewport.width.saturating_sub(x) < PANEL_MIN_WIDTH {
            return;
        }
        let label = Style::default().bold();
        let value = Style::fg(Rgb::new(200, 200, 200));

        let mut y = well.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        match snap.next {
            Some(kind) => {
                let style = block_style(kind);
                for (dx, dy) in get_shape(kind, Rotation::North) {
                    let px = x + dx as u16 * self.cell_w;
                    fb.fill_rect(px, y + dy as u16, self.cell_w, 1, Glyph::new('█', style));
                }
            }
            None => {
                fb.put_str(x, y, "-", value);
            }
        }
        y += 5;

        fb.put_str(x, y, "SFX", label);
        fb.put_str(x + 4, y, if snap.effects_enabled { "on" } else { "off" }, value);
        y += 2;

        let hint = value.dim();
        for line in ["p pause  r restart", "m sfx    q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }
}

fn draw_banner(fb: &mut FrameBuffer, well: Well, text: &str) {
    let len = text.chars().count() as u16;
    let x = well.x + well.w.saturating_sub(len) / 2;
    let y = well.y + well.h / 2;
    fb.put_str(x, y, text, Style::fg(Rgb::new(255, 255, 255)).bold());
}

fn block_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    Style::fg(fg).on(WELL_BG)
}
