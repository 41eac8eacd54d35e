use std::collections::HashMap;

mod bfs;
mod dfs;
mod dijkstra;

use crate::maze::Maze;

/// Grid coordinate, `(x, y)`.
pub type Coord = (u16, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Bfs,
    Dfs,
    Dijkstra,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
        }
    }
}

/// Outcome of one traversal. `visit_order` lists cells in the order the
/// algorithm finalized them, without duplicates; `parent_of` maps each
/// discovered cell to its predecessor on the discovery tree (the start cell
/// has no entry).
#[derive(Debug, Default, Clone)]
pub struct SearchResult {
    pub visit_order: Vec<Coord>,
    pub parent_of: HashMap<Coord, Coord>,
    pub found: bool,
}

/// Solving was requested in a state it cannot run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// No maze has been generated yet, so there is no start or end to
    /// search between.
    NotGenerated,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::NotGenerated => write!(f, "no maze built yet"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Runs the selected algorithm between the maze's designated endpoints.
pub fn solve_maze(maze: &Maze, solver: Solver) -> Result<SearchResult, SolveError> {
    let (Some(start), Some(end)) = (maze.start(), maze.end()) else {
        return Err(SolveError::NotGenerated);
    };
    let result = search(maze, solver, start, end);
    tracing::debug!(
        "[solve] {} visited {} cells, found = {}",
        solver,
        result.visit_order.len(),
        result.found
    );
    Ok(result)
}

/// Runs the selected algorithm between explicit endpoints. The maze is
/// read-only for the duration; all traversal state lives in the result.
pub fn search(maze: &Maze, solver: Solver, start: Coord, end: Coord) -> SearchResult {
    match solver {
        Solver::Bfs => bfs::search(maze, start, end),
        Solver::Dfs => dfs::search(maze, start, end),
        Solver::Dijkstra => dijkstra::search(maze, start, end),
    }
}

/// A reconstructed start-to-end path and the summed terrain cost of
/// standing on every cell along it, endpoints included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Coord>,
    pub total_cost: u32,
}

/// Walks predecessor links backward from `end` until a cell with no parent
/// entry (the start), then reverses into start-to-end order. Only
/// meaningful after a search that reported `found = true`.
pub fn reconstruct_path(maze: &Maze, end: Coord, result: &SearchResult) -> Path {
    let mut cells = Vec::new();
    let mut total_cost = 0u32;
    let mut current = Some(end);
    while let Some(coord) = current {
        cells.push(coord);
        // Walls cannot appear on a discovery tree; contribute nothing if
        // one somehow does.
        total_cost += maze[coord].cost().unwrap_or(0);
        current = result.parent_of.get(&coord).copied();
    }
    cells.reverse();
    Path { cells, total_cost }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::maze::{Maze, Terrain};

    use super::Coord;

    /// 5x5 maze with an L-shaped corridor of grass from (1, 1) to (3, 3):
    ///
    /// ```text
    /// # # # # #
    /// # . . . #
    /// # # # . #
    /// # # # . #
    /// # # # # #
    /// ```
    pub fn l_corridor() -> Maze {
        let mut maze = Maze::new(5, 5, None).unwrap();
        for coord in [(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)] {
            maze.set(coord, Terrain::Grass);
        }
        maze.set_endpoints((1, 1), (3, 3));
        maze
    }

    /// 5x5 maze with a ring of passages around a center wall. The top route
    /// from (1, 1) to (3, 3) wades through water at (2, 1); the bottom
    /// route is grass all the way. Both routes are four hops.
    ///
    /// ```text
    /// # # # # #
    /// # . ~ . #
    /// # . # . #
    /// # . . . #
    /// # # # # #
    /// ```
    pub fn weighted_ring() -> Maze {
        let mut maze = Maze::new(5, 5, None).unwrap();
        for coord in [
            (1, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ] {
            maze.set(coord, Terrain::Grass);
        }
        maze.set((2, 1), Terrain::Water);
        maze.set_endpoints((1, 1), (3, 3));
        maze
    }

    /// 5x5 maze where (1, 1) and (3, 3) are both carved but separated by a
    /// wall moat.
    pub fn moat() -> Maze {
        let mut maze = Maze::new(5, 5, None).unwrap();
        maze.set((1, 1), Terrain::Grass);
        maze.set((3, 3), Terrain::Grass);
        maze.set_endpoints((1, 1), (3, 3));
        maze
    }

    /// Asserts that `cells` is a valid passage path from `start` to `end`:
    /// non-empty, endpoints in place, consecutive cells adjacent, no walls.
    pub fn assert_valid_path(maze: &Maze, cells: &[Coord], start: Coord, end: Coord) {
        assert!(!cells.is_empty());
        assert_eq!(cells[0], start);
        assert_eq!(cells[cells.len() - 1], end);
        for coord in cells {
            assert_ne!(maze[*coord], Terrain::Wall, "path runs through {coord:?}");
        }
        for pair in cells.windows(2) {
            let dx = pair[0].0.abs_diff(pair[1].0);
            let dy = pair[0].1.abs_diff(pair[1].1);
            assert_eq!(
                dx + dy,
                1,
                "path jumps from {:?} to {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;
    use crate::maze::Terrain;

    #[test]
    fn test_solve_before_generate_is_rejected() {
        let maze = Maze::new(5, 5, None).unwrap();
        for solver in [Solver::Bfs, Solver::Dfs, Solver::Dijkstra] {
            assert_eq!(
                solve_maze(&maze, solver).err(),
                Some(SolveError::NotGenerated)
            );
        }
    }

    #[test]
    fn test_all_solvers_agree_on_reachability() {
        for seed in [1, 2, 3] {
            let mut maze = Maze::new(25, 21, None).unwrap();
            generate_maze(&mut maze, Some(seed));
            for solver in [Solver::Bfs, Solver::Dfs, Solver::Dijkstra] {
                let result = solve_maze(&maze, solver).unwrap();
                // Prim's carving connects every passage cell, so the end is
                // always reachable.
                assert!(result.found, "{solver} failed on seed {seed}");
            }
        }

        let moat = fixtures::moat();
        for solver in [Solver::Bfs, Solver::Dfs, Solver::Dijkstra] {
            assert!(!solve_maze(&moat, solver).unwrap().found);
        }
    }

    #[test]
    fn test_start_equals_end() {
        let maze = fixtures::l_corridor();
        for solver in [Solver::Bfs, Solver::Dfs, Solver::Dijkstra] {
            let result = search(&maze, solver, (1, 1), (1, 1));
            assert!(result.found);
            assert_eq!(result.visit_order, vec![(1, 1)]);
            assert!(result.parent_of.is_empty());

            let path = reconstruct_path(&maze, (1, 1), &result);
            assert_eq!(path.cells, vec![(1, 1)]);
            assert_eq!(path.total_cost, 1);
        }
    }

    #[test]
    fn test_reconstruct_corridor_path() {
        let maze = fixtures::l_corridor();
        let result = search(&maze, Solver::Bfs, (1, 1), (3, 3));
        assert!(result.found);
        let path = reconstruct_path(&maze, (3, 3), &result);
        assert_eq!(path.cells, vec![(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)]);
        // All grass, so the cost is one per cell, endpoints included.
        assert_eq!(path.total_cost, path.cells.len() as u32);
    }

    #[test]
    fn test_reconstruct_skips_wall_cost_defensively() {
        let mut maze = Maze::new(5, 5, None).unwrap();
        maze.set((1, 1), Terrain::Grass);
        maze.set((3, 1), Terrain::Grass);
        // A parent chain that runs through a wall never comes out of a real
        // search; the wall must simply not count toward the total.
        let result = SearchResult {
            visit_order: vec![(1, 1), (2, 1), (3, 1)],
            parent_of: HashMap::from([((3, 1), (2, 1)), ((2, 1), (1, 1))]),
            found: true,
        };
        let path = reconstruct_path(&maze, (3, 1), &result);
        assert_eq!(path.cells, vec![(1, 1), (2, 1), (3, 1)]);
        assert_eq!(path.total_cost, 2);
    }

    #[test]
    fn test_visit_order_is_deterministic() {
        let mut maze = Maze::new(25, 21, None).unwrap();
        generate_maze(&mut maze, Some(9));
        for solver in [Solver::Bfs, Solver::Dfs, Solver::Dijkstra] {
            let first = solve_maze(&maze, solver).unwrap();
            let second = solve_maze(&maze, solver).unwrap();
            assert_eq!(first.visit_order, second.visit_order, "{solver}");
        }
    }
}
