use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Maze, Terrain, grid::GridEvent};
use crate::solvers::{Path, SearchResult};

/// How a playback round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Completed,
    /// The user pressed Esc; the remaining frames were drawn without delay.
    Skipped,
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Current grid dimensions (width, height)
    grid_dims: Option<(u16, u16)>,
    /// Time to wait between playback frames
    refresh: Duration,
}

impl Renderer {
    /// Rows reserved below the grid for the status and controls lines.
    pub const NUM_LOG_ROWS: u16 = 2;
    const MIN_REFRESH: Duration = Duration::from_millis(1);
    const MAX_REFRESH: Duration = Duration::from_millis(320);

    const START_MARKER: &'static str = "🟢";
    const END_MARKER: &'static str = "🔴";

    pub fn new(refresh: Duration) -> Self {
        Renderer {
            stdout: std::io::stdout(),
            grid_dims: None,
            refresh,
        }
    }

    /// Whether the terminal has room for the grid plus the log rows.
    pub fn fits_terminal(width: u16, height: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(term_width >= width * Terrain::CELL_WIDTH
            && term_height >= height + Renderer::NUM_LOG_ROWS)
    }

    fn draw_cell(&mut self, coord: (u16, u16), content: impl std::fmt::Display) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(coord.0 * Terrain::CELL_WIDTH, coord.1),
            style::Print(content)
        )
    }

    /// Applies one grid event coming out of the generation thread.
    pub fn handle_grid_event(&mut self, event: &GridEvent) -> std::io::Result<()> {
        match *event {
            GridEvent::Initial {
                terrain,
                width,
                height,
            } => {
                self.grid_dims = Some((width, height));
                self.stdout.queue(cursor::MoveTo(0, 0))?;
                for _y in 0..height {
                    for _x in 0..width {
                        self.stdout.queue(style::Print(terrain))?;
                    }
                    self.stdout.queue(style::Print("\r\n"))?;
                }
            }
            GridEvent::Update { coord, new } => {
                self.draw_cell(coord, new)?;
            }
        }
        self.stdout.flush()
    }

    /// Redraws the whole maze, endpoint markers included. Also clears any
    /// visited or route markers left over from an earlier solve.
    pub fn draw_maze(&mut self, maze: &Maze) -> std::io::Result<()> {
        self.grid_dims = Some((maze.width(), maze.height()));
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                self.stdout.queue(style::Print(maze[(x, y)]))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.draw_endpoints(maze)?;
        self.stdout.flush()
    }

    fn draw_endpoints(&mut self, maze: &Maze) -> std::io::Result<()> {
        if let Some(start) = maze.start() {
            self.draw_cell(start, Renderer::START_MARKER)?;
        }
        if let Some(end) = maze.end() {
            self.draw_cell(end, Renderer::END_MARKER)?;
        }
        Ok(())
    }

    /// Replays the visit order at the renderer's own pace, one marker per
    /// finalized cell. Endpoint cells keep their markers.
    pub fn play_visits(&mut self, maze: &Maze, result: &SearchResult) -> std::io::Result<Playback> {
        let mut playback = Playback::Completed;
        for &coord in &result.visit_order {
            if Some(coord) == maze.start() || Some(coord) == maze.end() {
                continue;
            }
            self.draw_cell(coord, "• ".with(Color::Yellow))?;
            self.stdout.flush()?;
            if playback == Playback::Skipped {
                continue;
            }
            std::thread::sleep(self.refresh);
            if self.poll_playback_keys()? == Playback::Skipped {
                tracing::debug!("[playback] skipping ahead");
                playback = Playback::Skipped;
            }
        }
        Ok(playback)
    }

    /// Drains pending input without blocking. Esc skips the rest of the
    /// playback; up and down arrows change its pace.
    pub(super) fn poll_playback_keys(&mut self) -> std::io::Result<Playback> {
        let mut status = Playback::Completed;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => status = Playback::Skipped,
                    KeyCode::Up => self.refresh = (self.refresh / 2).max(Renderer::MIN_REFRESH),
                    KeyCode::Down => self.refresh = (self.refresh * 2).min(Renderer::MAX_REFRESH),
                    _ => {}
                }
            }
        }
        Ok(status)
    }

    /// Overlays the reconstructed route on the maze, endpoints excluded.
    pub fn draw_path(&mut self, maze: &Maze, path: &Path) -> std::io::Result<()> {
        for &coord in &path.cells {
            if Some(coord) == maze.start() || Some(coord) == maze.end() {
                continue;
            }
            self.draw_cell(coord, "██".with(Color::Red))?;
        }
        self.draw_endpoints(maze)?;
        self.stdout.flush()
    }

    /// Writes a status message on the first line below the grid, clipped
    /// to the terminal width.
    pub fn status(&mut self, message: &str, color: Color) -> std::io::Result<()> {
        self.log_line(0, message, color, Attribute::Bold)
    }

    /// Writes the key hints on the second line below the grid.
    pub fn controls(&mut self, hint: &str) -> std::io::Result<()> {
        self.log_line(1, hint, Color::DarkGrey, Attribute::Dim)
    }

    fn log_line(
        &mut self,
        offset: u16,
        message: &str,
        color: Color,
        attribute: Attribute,
    ) -> std::io::Result<()> {
        let row = self.grid_dims.map_or(0, |(_, height)| height) + offset;
        let term_width = terminal::size()?.0 as usize;
        let (clipped, _) = message.unicode_truncate(term_width);
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(clipped.with(color).attribute(attribute)),
        )?;
        self.stdout.flush()
    }

    /// Rings the terminal bell.
    pub fn bell(&mut self) -> std::io::Result<()> {
        self.stdout.queue(style::Print('\x07'))?;
        self.stdout.flush()
    }
}
