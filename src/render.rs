use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{PelletKind, Tile};
use crate::error::GameError;
use crate::frame::Surface;
use crate::game::{Game, SessionState};
use crate::ghost::GhostKind;
use crate::leaderboard::FormField;
use crate::level::CellKind;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Glyph {
    Player,
    Doc,
    Folder,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power,
    Gate,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Screen {
    Menu,
    Board,
    Form,
}

/// Diffing terminal painter: only cells that changed since the previous
/// frame are rewritten.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_banner: String,
    last_text: Vec<String>,
    screen: Option<Screen>,
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
            last_banner: String::new(),
            last_text: Vec::new(),
            screen: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Paints `game` for a terminal of `term` (columns, rows).
    pub fn draw<W: Write>(&mut self, out: &mut W, game: &Game, term: (u16, u16)) -> io::Result<()> {
        let screen = match game.state() {
            SessionState::Idle => Screen::Menu,
            SessionState::Playing | SessionState::CapturedTransition => Screen::Board,
            SessionState::Ended => Screen::Form,
        };
        if self.screen != Some(screen) {
            self.screen = Some(screen);
            self.needs_full = true;
        }

        match screen {
            Screen::Menu => self.draw_text(out, &menu_lines(game), term),
            Screen::Form => self.draw_text(out, &form_lines(game), term),
            Screen::Board => self.draw_board(out, game, term),
        }
    }

    fn draw_board<W: Write>(&mut self, out: &mut W, game: &Game, term: (u16, u16)) -> io::Result<()> {
        let maze = game.maze();
        let needed_h = (maze.rows() + 3) as u16;
        let needed_w = (maze.cols() * CELL_W) as u16;
        let (term_w, term_h) = term;

        out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "SCORE: {}  PELLETS: {}  (arrows to move, esc to leave)",
            game.score(),
            game.ledger().remaining()
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for row in 0..maze.rows() {
            for col in 0..maze.cols() {
                let cell = cell_for(game, Tile::new(row as i32, col as i32));
                let idx = row * maze.cols() + col;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, col, row, cell)?;
                }
            }
        }

        let banner = banner_for(game).to_string();
        if self.needs_full || banner != self.last_banner {
            let banner_y = self.origin_y + maze.rows() as u16;
            out.queue(MoveTo(self.origin_x, banner_y))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            if !banner.is_empty() {
                let pad = (needed_w as usize).saturating_sub(banner.len()) / 2;
                out.queue(MoveTo(self.origin_x + pad as u16, banner_y))?;
                out.queue(SetForegroundColor(Color::Yellow))?;
                out.queue(Print(&banner))?;
                out.queue(ResetColor)?;
            }
            self.last_banner = banner;
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = glyph_text(cell.glyph);
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
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

    fn draw_text<W: Write>(&mut self, out: &mut W, lines: &[String], term: (u16, u16)) -> io::Result<()> {
        if !self.needs_full && lines == self.last_text.as_slice() {
            return Ok(());
        }
        let (term_w, term_h) = term;
        out.queue(Clear(ClearType::All))?;
        let top = term_h.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let width = UnicodeWidthStr::width(line.as_str()) as u16;
            let left = term_w.saturating_sub(width) / 2;
            out.queue(MoveTo(left, top + i as u16))?;
            out.queue(Print(line))?;
        }
        out.flush()?;
        self.last_text = lines.to_vec();
        self.needs_full = false;
        Ok(())
    }
}

pub fn cell_for(game: &Game, tile: Tile) -> Cell {
    if game.player().tile() == tile {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game.ghosts().iter().find(|g| g.body.tile() == tile) {
        if ghost.frightened {
            return Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            };
        }
        return match ghost.kind {
            GhostKind::Doc => Cell {
                glyph: Glyph::Doc,
                color: Color::Red,
            },
            GhostKind::Folder => Cell {
                glyph: Glyph::Folder,
                color: Color::DarkYellow,
            },
        };
    }
    match game.ledger().pellet_at(tile) {
        Some(PelletKind::Normal) => {
            return Cell {
                glyph: Glyph::Pellet,
                color: Color::White,
            }
        }
        Some(PelletKind::Power) => {
            return Cell {
                glyph: Glyph::Power,
                color: Color::Magenta,
            }
        }
        None => {}
    }
    match game.maze().cell_at(tile.row, tile.col) {
        CellKind::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        },
        CellKind::Gate => Cell {
            glyph: Glyph::Gate,
            color: Color::Magenta,
        },
        CellKind::Open | CellKind::Empty | CellKind::PowerUp | CellKind::PenInterior => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Player => "😃",
        Glyph::Doc => "📄",
        Glyph::Folder => "📁",
        Glyph::Frightened => "😱",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "☕",
        Glyph::Gate => "==",
    }
}

pub fn banner_for(game: &Game) -> &'static str {
    match game.state() {
        SessionState::Playing if !game.has_started() => "READY!",
        SessionState::CapturedTransition => "CRUNCHED!",
        _ => "",
    }
}

fn menu_lines(game: &Game) -> Vec<String> {
    let mut lines = vec![
        "WORK PAC-MAN".to_string(),
        String::new(),
        "enter: play now    esc: return to surface".to_string(),
        String::new(),
        "LEADERBOARD".to_string(),
    ];
    for (i, entry) in game.leaderboard().entries().iter().enumerate() {
        lines.push(format!("{}. {:<6} {:>7}", i + 1, entry.name, entry.score));
    }
    lines
}

fn form_lines(game: &Game) -> Vec<String> {
    let form = game.form();
    let marker = |field: FormField| if form.focus == field { ">" } else { " " };
    vec![
        "GAME OVER".to_string(),
        format!("FINAL SCORE: {}", game.score()),
        String::new(),
        format!("{} Initials:  {:<3}", marker(FormField::Initials), form.initials),
        format!("{} Full name: {}", marker(FormField::FullName), form.full_name),
        format!("{} Email:     {}", marker(FormField::Email), form.email),
        String::new(),
        if form.is_complete() {
            "enter: submit score".to_string()
        } else {
            "all fields are required".to_string()
        },
        "tab: next field    f5: try again (no save)    esc: return to surface".to_string(),
    ]
}

/// The live terminal as a frame surface.
pub struct TerminalSurface {
    out: Stdout,
    renderer: Renderer,
}

impl TerminalSurface {
    pub fn new(out: Stdout, renderer: Renderer) -> Self {
        Self { out, renderer }
    }

    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}

impl Surface for TerminalSurface {
    type Error = GameError;

    fn paint(&mut self, game: &Game) -> Result<(), GameError> {
        let size = terminal::size()?;
        self.renderer.draw(&mut self.out, game, size)?;
        Ok(())
    }
}
