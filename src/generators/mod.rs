use rand::{Rng, SeedableRng, rngs::StdRng};

mod prim;

use crate::maze::{Maze, Terrain};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Rebuilds the maze from scratch: carves a spanning passage structure with
/// a randomized Prim's variant, assigns terrain to every passage cell, and
/// designates the start and end cells. The same seed reproduces the same
/// maze exactly.
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) {
    let mut rng = get_rng(seed);

    prim::carve(maze, &mut rng);
    assign_terrain(maze, &mut rng);

    // Endpoints sit on the lattice corners and are always cheap to stand on,
    // whatever the terrain draw said.
    let start = (1, 1);
    let end = (maze.width() - 2, maze.height() - 2);
    maze.set(start, Terrain::Grass);
    maze.set(end, Terrain::Grass);
    maze.set_endpoints(start, end);

    tracing::debug!(
        "[generate] built {}x{} maze, start {:?}, end {:?}",
        maze.width(),
        maze.height(),
        start,
        end
    );
}

/// Draws a terrain for every carved cell independently: mostly grass, some
/// mud, the occasional water. Walls are left alone.
fn assign_terrain(maze: &mut Maze, rng: &mut StdRng) {
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            if maze[(x, y)] == Terrain::Wall {
                continue;
            }
            let chance = rng.random::<f64>();
            let terrain = if chance < 0.6 {
                Terrain::Grass
            } else if chance < 0.85 {
                Terrain::Mud
            } else {
                Terrain::Water
            };
            maze.set((x, y), terrain);
        }
    }
}
