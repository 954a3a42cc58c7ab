use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Tile, TilePos};
use crate::ghost::GhostMode;
use crate::level::{box_centre, MazeGrid};
use crate::session::{Session, SessionStatus};

const CELL_W: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Draws a session into the terminal, repainting only cells that changed
/// since the previous frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, out: &mut impl Write, session: &Session) -> io::Result<()> {
        let grid = session.grid();
        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        let Some((origin_x, origin_y)) = board_origin(grid, term_w, term_h) else {
            let (needed_w, needed_h) = board_size(grid);
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Window is {term_w}x{term_h}; the maze needs {needed_w}x{needed_h}."
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        };
        if (origin_x, origin_y) != (self.origin_x, self.origin_y) {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }

        let hud = hud_line(session);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for (pos, _) in grid.iter() {
            let cell = cell_for(session, pos);
            let idx = pos.row * grid.cols() + pos.col;
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(out, pos, cell)?;
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, pos: TilePos, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
        };
        let x_pos = self.origin_x + (pos.col * CELL_W) as u16;
        let y_pos = self.origin_y + pos.row as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Terminal columns and rows taken by the maze plus the HUD line above it.
fn board_size(grid: &MazeGrid) -> (u16, u16) {
    ((grid.cols() * CELL_W) as u16, (grid.rows() + 2) as u16)
}

/// Top-left screen cell of the maze when centred, or `None` when the
/// terminal is too small. Row `origin_y - 1` holds the HUD.
fn board_origin(grid: &MazeGrid, term_w: u16, term_h: u16) -> Option<(u16, u16)> {
    let (needed_w, needed_h) = board_size(grid);
    if term_w < needed_w || term_h < needed_h {
        return None;
    }
    Some(((term_w - needed_w) / 2, (term_h - needed_h) / 2 + 1))
}

fn hud_line(session: &Session) -> String {
    let mut hud = format!(
        "Score: {}  High: {}  Pellets: {}",
        session.score(),
        session.high_score(),
        session.grid().remaining_collectibles()
    );
    if session.power_active() {
        hud.push_str(&format!("  Power: {:.1}s", session.power_remaining()));
    }
    hud.push_str("  (q to quit)");
    hud
}

fn cell_for(session: &Session, pos: TilePos) -> Cell {
    let grid = session.grid();
    if grid.tile_at(box_centre(session.player().position)) == Some(pos) {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = session
        .ghosts()
        .iter()
        .find(|g| grid.tile_at(box_centre(g.position)) == Some(pos))
    {
        if ghost.mode == GhostMode::Evade {
            return Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            };
        }
        return Cell {
            glyph: Glyph::Ghost,
            color: Color::Red,
        };
    }
    match grid.tile(pos) {
        Some(Tile::Wall) => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Some(Tile::Pellet) => Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Some(Tile::PowerPellet) => Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
        Some(Tile::Empty) | Some(Tile::SpawnMarker) | None => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

/// Shows the final score under the maze and waits for `q`.
pub fn render_game_over(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let grid = session.grid();
    let (term_w, term_h) = terminal::size()?;
    let below_maze = match board_origin(grid, term_w, term_h) {
        Some((origin_x, origin_y)) => MoveTo(origin_x, origin_y + grid.rows() as u16),
        None => MoveTo(0, board_size(grid).1),
    };
    out.queue(below_maze)?;
    let headline = match session.status() {
        SessionStatus::Victory => "YOU WIN",
        _ => "GAME OVER",
    };
    out.queue(Print(format!(
        "{} - Score: {}  High Score: {} (press q to quit)",
        headline,
        session.score(),
        session.high_score()
    )))?;
    out.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}
