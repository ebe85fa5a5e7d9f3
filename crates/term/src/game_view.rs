//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameOutcome, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, Direction, PlayerId, Pos};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Rows taken by the score line above the field.
pub const HEADER_ROWS: u16 = 1;

/// Columns reserved right of the field when the keys panel is shown.
pub const KEYS_PANEL_WIDTH: u16 = 24;

const KEYS_ONE_PLAYER: &[&str] = &[
    "KEYS",
    "w k / up     north",
    "s j / down   south",
    "a h / left   west",
    "d l / right  east",
    "p            pause",
    "q            quit",
];

const KEYS_TWO_PLAYERS: &[&str] = &[
    "KEYS",
    "P1 w s a d / h j k l",
    "P2 arrow keys",
    "p  pause",
    "q  quit",
];

const BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the snake field.
pub struct GameView {
    show_keys: bool,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            show_keys: true,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(show_keys: bool) -> Self {
        Self {
            show_keys,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Smallest viewport that shows a `height` x `width` field in full.
    pub fn required_viewport(&self, height: u16, width: u16) -> Viewport {
        let panel = if self.show_keys { KEYS_PANEL_WIDTH + 2 } else { 0 };
        Viewport::new(
            width.saturating_add(panel),
            height.saturating_add(HEADER_ROWS),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let frame = self.required_viewport(snap.height, snap.width);
        let start_x = viewport.width.saturating_sub(frame.width) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame.height) / 2,
            AnchorY::Top => 0,
        };
        let field_y = start_y.saturating_add(HEADER_ROWS);

        self.draw_score_line(fb, snap, start_x, start_y);

        for row in 0..snap.height {
            for col in 0..snap.width {
                let Some(cell) = snap.cell(Pos::new(row, col)) else {
                    continue;
                };
                let (ch, style) = glyph(snap, cell);
                fb.put_char(start_x + col, field_y + row, ch, style);
            }
        }

        if self.show_keys {
            self.draw_keys_panel(fb, snap, viewport, start_x + snap.width, field_y);
        }

        if snap.paused() {
            self.draw_overlay_text(fb, start_x, field_y, snap, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(fb, start_x, field_y, snap, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_score_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::default();

        if snap.two_players {
            let mut cx = x;
            for player in PlayerId::ALL {
                let tag = match player {
                    PlayerId::One => "P1 ",
                    PlayerId::Two => "P2 ",
                };
                cx = fb.put_str(cx, y, tag, label.with_fg(player_color(player)));
                cx = fb.put_u32(cx, y, snap.score(player), value);
                cx = cx.saturating_add(3);
            }
        } else {
            let cx = fb.put_str(x, y, "Score: ", label);
            fb.put_u32(cx, y, snap.score(PlayerId::One), value);
        }
    }

    fn draw_keys_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        field_end_x: u16,
        y: u16,
    ) {
        let panel_x = field_end_x.saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < KEYS_PANEL_WIDTH {
            return;
        }

        let lines = if snap.two_players {
            KEYS_TWO_PLAYERS
        } else {
            KEYS_ONE_PLAYER
        };
        let label = CellStyle::default().bold();
        let text = CellStyle::fg(Rgb::new(160, 160, 170));

        for (i, line) in lines.iter().enumerate() {
            let row = y.saturating_add(i as u16);
            if row >= viewport.height {
                break;
            }
            fb.put_str(panel_x, row, line, if i == 0 { label } else { text });
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        field_y: u16,
        snap: &GameSnapshot,
        text: &str,
    ) {
        let mid_y = field_y.saturating_add(snap.height / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(snap.width.saturating_sub(text_w) / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);

        if let Some(GameOutcome::Died { player, .. }) = snap.outcome {
            if snap.two_players {
                let who = match player {
                    PlayerId::One => "P1 crashed",
                    PlayerId::Two => "P2 crashed",
                };
                let w = who.len() as u16;
                let x = start_x.saturating_add(snap.width.saturating_sub(w) / 2);
                let style = style.with_fg(player_color(player));
                fb.put_str(x, mid_y.saturating_add(1), who, style);
            }
        }
    }
}

fn player_color(player: PlayerId) -> Rgb {
    match player {
        PlayerId::One => Rgb::new(100, 220, 120),
        PlayerId::Two => Rgb::new(80, 160, 240),
    }
}

/// Character and style for one field cell.
pub fn glyph(snap: &GameSnapshot, cell: Cell) -> (char, CellStyle) {
    match cell {
        Cell::Empty => (' ', CellStyle::default()),
        Cell::SnakeBody => ('#', CellStyle::fg(Rgb::new(170, 200, 170))),
        Cell::Head(player) => {
            let ch = match snap.direction(player) {
                Some(Direction::North) => '^',
                Some(Direction::East) => '>',
                Some(Direction::West) => '<',
                Some(Direction::South) | None => 'v',
            };
            (ch, CellStyle::fg(player_color(player)).bold())
        }
        Cell::Border => ('*', CellStyle::fg(Rgb::new(200, 200, 200)).on(BG)),
        Cell::Obstacle => ('x', CellStyle::fg(Rgb::new(220, 80, 80))),
        Cell::Food => ('f', CellStyle::fg(Rgb::new(240, 220, 80)).bold()),
        Cell::Shortener => ('s', CellStyle::fg(Rgb::new(200, 120, 220)).bold()),
        Cell::Decelerator => ('d', CellStyle::fg(Rgb::new(80, 220, 220)).bold()),
        Cell::BonusPoints => ('e', CellStyle::fg(Rgb::new(255, 165, 0)).bold()),
    }
}
