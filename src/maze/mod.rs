pub mod cell;
pub mod grid;

use std::sync::mpsc::SyncSender;

pub use cell::Terrain;
use grid::{Grid, GridEvent};

/// Rejected maze dimensions. Carving operates on a 2-cell stride, so both
/// dimensions must be odd and large enough to hold at least one lattice room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    TooSmall { width: u16, height: u16 },
    EvenDimension { width: u16, height: u16 },
}

impl std::fmt::Display for MazeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MazeError::TooSmall { width, height } => write!(
                f,
                "maze dimensions {}x{} are too small, both must be at least 3",
                width, height
            ),
            MazeError::EvenDimension { width, height } => write!(
                f,
                "maze dimensions {}x{} must both be odd to align with the carving lattice",
                width, height
            ),
        }
    }
}

impl std::error::Error for MazeError {}

pub struct Maze {
    grid: Grid,
    start: Option<(u16, u16)>,
    end: Option<(u16, u16)>,
}

impl Maze {
    /// Creates an all-wall maze with no designated start or end. Passages
    /// and endpoints only exist after [`crate::generators::generate_maze`]
    /// has run.
    pub fn new(
        width: u16,
        height: u16,
        sender: Option<SyncSender<GridEvent>>,
    ) -> Result<Self, MazeError> {
        if width < 3 || height < 3 {
            return Err(MazeError::TooSmall { width, height });
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(MazeError::EvenDimension { width, height });
        }
        Ok(Maze {
            grid: Grid::new(width, height, Terrain::Wall, sender),
            start: None,
            end: None,
        })
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// The designated start cell, `None` until the maze has been generated.
    pub fn start(&self) -> Option<(u16, u16)> {
        self.start
    }

    /// The designated end cell, `None` until the maze has been generated.
    pub fn end(&self) -> Option<(u16, u16)> {
        self.end
    }

    pub(crate) fn set_endpoints(&mut self, start: (u16, u16), end: (u16, u16)) {
        self.start = Some(start);
        self.end = Some(end);
    }

    pub fn in_bounds(&self, coord: (u16, u16)) -> bool {
        self.grid.in_bounds(coord)
    }

    pub fn set(&mut self, coord: (u16, u16), terrain: Terrain) {
        self.grid.set(coord, terrain);
    }

    /// Stops forwarding grid events to the renderer, closing the channel
    /// once this was the last sender.
    pub fn detach_events(&mut self) {
        self.grid.take_sender();
    }

    /// Passable neighbors of a cell, one step away in the cardinal
    /// directions. The enumeration order is fixed (left, right, up, down)
    /// and filters out-of-bounds and wall cells; traversal tie-breaking
    /// depends on this order staying stable.
    pub fn passable_neighbors(&self, coord: (u16, u16)) -> impl Iterator<Item = (u16, u16)> + '_ {
        let (x, y) = coord;
        [
            // NOTE: wrapping_sub keeps x - 1 / y - 1 overflow-safe: at 0 the
            // subtraction wraps to u16::MAX, which the bounds check filters
            // out. saturating_add pins x + 1 / y + 1 at u16::MAX, which is
            // likewise never in bounds for a grid indexed up to width - 1.
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ]
        .into_iter()
        .filter(move |&c| self.in_bounds(c) && self.grid[c].is_passable())
    }
}

impl std::ops::Index<(u16, u16)> for Maze {
    type Output = Terrain;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.grid[index]
    }
}
