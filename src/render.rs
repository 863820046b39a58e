use std::io::{self, Write};

use crossterm::cursor::{MoveTo, Show};
use crossterm::event::DisableMouseCapture;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::direction::Direction;
use crate::input::direction_toward;
use crate::maze::{Maze, Pos};
use crate::simulation::Snapshot;

pub const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Player,
    Wanderer,
    Wall,
    Open,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sprite {
    pub glyph: Glyph,
    pub color: Color,
}

/// Player is drawn over the wanderer when they share a cell.
pub fn cell_for(maze: &Maze, snapshot: &Snapshot, pos: Pos) -> Sprite {
    if pos == snapshot.player.pos {
        return Sprite {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == snapshot.wanderer.pos {
        return Sprite {
            glyph: Glyph::Wanderer,
            color: Color::Red,
        };
    }
    if maze.is_open_at(pos) {
        Sprite {
            glyph: Glyph::Open,
            color: Color::Reset,
        }
    } else {
        Sprite {
            glyph: Glyph::Wall,
            color: Color::Blue,
        }
    }
}

/// Where the board sits on the terminal. Row `origin_y - 1` holds the HUD.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Viewport {
    pub origin_x: u16,
    pub origin_y: u16,
}

impl Viewport {
    /// Centres a `width` x `height` board, or `None` if the terminal is too small.
    pub fn centered(term: (u16, u16), width: usize, height: usize) -> Option<Self> {
        let (needed_w, needed_h) = needed_size(width, height);
        let (term_w, term_h) = term;
        if term_w < needed_w || term_h < needed_h {
            return None;
        }
        Some(Self {
            origin_x: (term_w - needed_w) / 2,
            origin_y: (term_h - needed_h) / 2 + 1,
        })
    }

    pub fn screen_of(&self, pos: Pos) -> (u16, u16) {
        (
            self.origin_x + (pos.x * CELL_W) as u16,
            self.origin_y + pos.y as u16,
        )
    }

    /// Direction from the player's drawn cell toward a click, measured in
    /// grid cells so both axes weigh the same.
    pub fn pointer_direction(&self, player: Pos, column: u16, row: u16) -> Direction {
        let (sx, sy) = self.screen_of(player);
        let cx = sx as f32 + (CELL_W as f32 - 1.0) / 2.0;
        let dx = (column as f32 - cx) / CELL_W as f32;
        let dy = row as f32 - sy as f32;
        direction_toward(dx, dy)
    }
}

fn needed_size(width: usize, height: usize) -> (u16, u16) {
    ((width * CELL_W) as u16, (height + 2) as u16)
}

pub struct Renderer {
    last: Vec<Sprite>,
    last_hud: String,
    needs_full: bool,
    viewport: Option<Viewport>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Sprite {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            viewport: None,
        }
    }

    /// Viewport of the last frame that fit the terminal.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn render(
        &mut self,
        out: &mut impl Write,
        term: (u16, u16),
        maze: &Maze,
        snapshot: &Snapshot,
        paused: bool,
    ) -> io::Result<()> {
        out.queue(MoveTo(0, 0))?;

        let Some(viewport) = Viewport::centered(term, maze.columns(), maze.rows()) else {
            let (needed_w, needed_h) = needed_size(maze.columns(), maze.rows());
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term.0, term.1
            )))?;
            out.flush()?;
            self.needs_full = true;
            self.viewport = None;
            return Ok(());
        };
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Tick: {}  {}(hjkl/arrows/click to steer, p to pause, q to quit)",
            snapshot.tick,
            if paused { "PAUSED  " } else { "" }
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(viewport.origin_x, viewport.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..maze.rows() {
            for x in 0..maze.columns() {
                let pos = Pos { x, y };
                let sprite = cell_for(maze, snapshot, pos);
                let idx = y * maze.columns() + x;
                if self.needs_full || sprite != self.last[idx] {
                    self.last[idx] = sprite;
                    draw_cell(out, viewport, pos, sprite)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()
    }
}

fn draw_cell(out: &mut impl Write, viewport: Viewport, pos: Pos, sprite: Sprite) -> io::Result<()> {
    let text = match sprite.glyph {
        Glyph::Player => "ᗧ",
        Glyph::Wanderer => "ᗣ",
        Glyph::Wall => "██",
        Glyph::Open => "  ",
    };
    let (x, y) = viewport.screen_of(pos);
    out.queue(MoveTo(x, y))?;
    out.queue(SetForegroundColor(sprite.color))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Undoes mouse capture, the hidden cursor, the alternate screen and raw mode.
/// Every step runs even if an earlier one fails; the first error is returned.
pub fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    let steps = [
        out.execute(DisableMouseCapture).map(drop),
        out.execute(Show).map(drop),
        out.execute(LeaveAlternateScreen).map(drop),
        terminal::disable_raw_mode(),
    ];
    steps.into_iter().collect()
}
