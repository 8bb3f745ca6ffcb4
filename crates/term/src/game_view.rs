//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, ViewCell};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Score-report state shown under the side panel after game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatusView {
    /// Nothing to show (score 0, or not yet over)
    Hidden,
    /// Name being typed
    EnterName(String),
    Pending,
    Saved,
    Failed(String),
    /// Player skipped saving
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Piece colors in color-index order (I, O, T, L, J, S, Z).
const PALETTE: [Rgb; 7] = [
    Rgb::new(6, 182, 212),
    Rgb::new(234, 179, 8),
    Rgb::new(168, 85, 247),
    Rgb::new(249, 115, 22),
    Rgb::new(59, 130, 246),
    Rgb::new(34, 197, 94),
    Rgb::new(239, 68, 68),
];

pub fn piece_color(color_index: u8) -> Rgb {
    PALETTE
        .get(color_index as usize)
        .copied()
        .unwrap_or(Rgb::new(200, 200, 200))
}

/// A lightweight terminal renderer for the block-stacking game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

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

    /// Render into an existing framebuffer; reuse it across frames.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        report: &ReportStatusView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let (ch, style) = match snap.cell_at(x, y) {
                    ViewCell::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
                    ViewCell::Settled(c) => ('█', CellStyle::new(piece_color(c), BOARD_BG)),
                    ViewCell::Active(c) => ('█', CellStyle::new(piece_color(c), BOARD_BG).bold()),
                    ViewCell::Ghost(c) => (
                        '░',
                        CellStyle::new(piece_color(c).scaled(80), BOARD_BG).dim(),
                    ),
                };
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, report, viewport, start_x + frame_w + 2, start_y);

        let overlay = match snap.phase {
            Phase::Idle => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::GameOver => Some("GAME OVER"),
            Phase::Running => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Allocating convenience wrapper.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        report: &ReportStatusView,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, report, viewport, &mut fb);
        fb
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        report: &ReportStatusView,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "PIECE", label);
        if let Some(active) = snap.active {
            let style = CellStyle::new(piece_color(active.kind.color_index()), PANEL_BG).bold();
            let letter = active.kind.as_str().chars().next().unwrap_or('?');
            fb.put_char(panel_x, y + 1, letter.to_ascii_uppercase(), style);
        } else {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        y = y.saturating_add(3);

        match snap.phase {
            Phase::Idle => {
                for line in CONTROLS {
                    fb.put_str(panel_x, y, line, hint);
                    y = y.saturating_add(1);
                }
            }
            Phase::GameOver => {
                fb.put_str(panel_x, y, "FINAL", label);
                fb.put_u32(panel_x + 6, y, snap.score, value);
                y = y.saturating_add(2);
                self.draw_report_status(fb, report, panel_x, y);
            }
            Phase::Running | Phase::Paused => {
                fb.put_str(panel_x, y, "p pause  q quit", hint);
            }
        }
    }

    fn draw_report_status(&self, fb: &mut FrameBuffer, report: &ReportStatusView, x: u16, y: u16) {
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let good = CellStyle::new(Rgb::new(34, 197, 94), PANEL_BG).bold();
        let bad = CellStyle::new(Rgb::new(239, 68, 68), PANEL_BG);
        let hint = value.dim();

        match report {
            ReportStatusView::Hidden => {}
            ReportStatusView::EnterName(name) => {
                fb.put_str(x, y, "NAME", value.bold());
                fb.put_str(x, y + 1, name, value);
                fb.put_char(x + name.chars().count() as u16, y + 1, '_', value);
                fb.put_str(x, y + 2, "enter save  esc skip", hint);
            }
            ReportStatusView::Pending => fb.put_str(x, y, "saving...", value),
            ReportStatusView::Saved => fb.put_str(x, y, "score saved", good),
            ReportStatusView::Failed(reason) => {
                fb.put_str(x, y, "save failed", bad);
                fb.put_str(x, y + 1, reason, hint);
                fb.put_str(x, y + 2, "enter retry", hint);
            }
            ReportStatusView::Skipped => {}
        }
        if !matches!(report, ReportStatusView::EnterName(_)) {
            fb.put_str(x, y + 4, "r play again", hint);
        }
    }
}

const PANEL_W: u16 = 22;

const CONTROLS: [&str; 6] = [
    "a/d ←/→  move",
    "w ↑      rotate",
    "s ↓      soft drop",
    "space    hard drop",
    "p        pause",
    "enter    start",
];

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
