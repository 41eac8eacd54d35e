use std::collections::HashSet;

use rand::{Rng, rngs::StdRng};

use crate::maze::{Maze, Terrain};

/// Carves a spanning passage structure into an all-wall maze with a
/// randomized Prim's variant. Rooms live on the odd-coordinate lattice;
/// carving a frontier room also carves the wall cell between it and the
/// already-carved room it connects to, so every passage traces back to the
/// origin and the carved subgraph is connected by construction.
pub(super) fn carve(maze: &mut Maze, rng: &mut StdRng) {
    // Reset to all walls so regeneration starts from a clean slate.
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            maze.set((x, y), Terrain::Wall);
        }
    }

    let origin = (1, 1);
    maze.set(origin, Terrain::Grass);

    // Frontier rooms stay walls while queued; `queued` guards against
    // inserting the same room twice.
    let mut frontiers: Vec<(u16, u16)> = Vec::new();
    let mut queued: HashSet<(u16, u16)> = HashSet::new();
    queued.insert(origin);
    push_frontiers(maze, origin, &mut frontiers, &mut queued);

    while !frontiers.is_empty() {
        let frontier = frontiers.swap_remove(rng.random_range(0..frontiers.len()));

        let carved_neighbors = lattice_neighbors(maze, frontier)
            .filter(|&c| maze[c] != Terrain::Wall)
            .collect::<Vec<_>>();

        // A frontier that arrives with no carved neighbor is dropped, not
        // carved.
        if carved_neighbors.is_empty() {
            continue;
        }

        let neighbor = carved_neighbors[rng.random_range(0..carved_neighbors.len())];
        let between = (
            (frontier.0 + neighbor.0) / 2,
            (frontier.1 + neighbor.1) / 2,
        );
        maze.set(frontier, Terrain::Grass);
        maze.set(between, Terrain::Grass);

        push_frontiers(maze, frontier, &mut frontiers, &mut queued);
    }
}

/// Lattice neighbors of a room: cells two steps away in each cardinal
/// direction, clipped to the grid.
fn lattice_neighbors(maze: &Maze, coord: (u16, u16)) -> impl Iterator<Item = (u16, u16)> + '_ {
    let (x, y) = coord;
    [
        (x.wrapping_sub(2), y),
        (x.saturating_add(2), y),
        (x, y.wrapping_sub(2)),
        (x, y.saturating_add(2)),
    ]
    .into_iter()
    .filter(move |&c| maze.in_bounds(c))
}

fn push_frontiers(
    maze: &Maze,
    from: (u16, u16),
    frontiers: &mut Vec<(u16, u16)>,
    queued: &mut HashSet<(u16, u16)>,
) {
    for coord in lattice_neighbors(maze, from) {
        if maze[coord] == Terrain::Wall && queued.insert(coord) {
            frontiers.push(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_every_lattice_room_is_carved() {
        let mut maze = Maze::new(15, 11, None).unwrap();
        carve(&mut maze, &mut get_rng(Some(0)));
        for y in (1..11).step_by(2) {
            for x in (1..15).step_by(2) {
                assert_ne!(maze[(x, y)], Terrain::Wall, "room ({x}, {y}) left walled");
            }
        }
    }

    #[test]
    fn test_boundary_stays_walled() {
        let mut maze = Maze::new(15, 11, None).unwrap();
        carve(&mut maze, &mut get_rng(Some(5)));
        for x in 0..15 {
            assert_eq!(maze[(x, 0)], Terrain::Wall);
            assert_eq!(maze[(x, 10)], Terrain::Wall);
        }
        for y in 0..11 {
            assert_eq!(maze[(0, y)], Terrain::Wall);
            assert_eq!(maze[(14, y)], Terrain::Wall);
        }
    }

    #[test]
    fn test_carved_cells_form_one_connected_component() {
        let mut maze = Maze::new(25, 21, None).unwrap();
        carve(&mut maze, &mut get_rng(Some(11)));

        // Flood fill from the origin over passable cells.
        let mut reached = std::collections::HashSet::from([(1, 1)]);
        let mut stack = vec![(1u16, 1u16)];
        while let Some(coord) = stack.pop() {
            for neighbor in maze.passable_neighbors(coord) {
                if reached.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        let mut carved = 0;
        for y in 0..21 {
            for x in 0..25 {
                if maze[(x, y)] != Terrain::Wall {
                    carved += 1;
                    assert!(reached.contains(&(x, y)), "({x}, {y}) carved but unreachable");
                }
            }
        }
        assert_eq!(reached.len(), carved);
    }

    #[test]
    fn test_minimal_maze_is_a_single_room() {
        let mut maze = Maze::new(3, 3, None).unwrap();
        carve(&mut maze, &mut get_rng(Some(0)));
        assert_ne!(maze[(1, 1)], Terrain::Wall);
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    assert_eq!(maze[(x, y)], Terrain::Wall);
                }
            }
        }
    }
}
