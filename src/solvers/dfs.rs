use std::collections::{HashMap, HashSet};

use crate::maze::Maze;

use super::{Coord, SearchResult};

/// Depth-first search from `start` to `end`. A cell may sit on the stack
/// several times when different branches discover it; the finalized set
/// deduplicates at pop time, and the first push wins as the recorded
/// parent. Stops the moment `end` is popped.
pub(super) fn search(maze: &Maze, start: Coord, end: Coord) -> SearchResult {
    let mut stack = vec![start];
    let mut finalized = HashSet::new();
    let mut visit_order = Vec::new();
    let mut parent_of = HashMap::new();

    while let Some(current) = stack.pop() {
        if !finalized.insert(current) {
            // Stale entry from an earlier push.
            continue;
        }
        visit_order.push(current);
        if current == end {
            return SearchResult {
                visit_order,
                parent_of,
                found: true,
            };
        }
        for neighbor in maze.passable_neighbors(current) {
            if !finalized.contains(&neighbor) {
                parent_of.entry(neighbor).or_insert(current);
                stack.push(neighbor);
            }
        }
    }

    SearchResult {
        visit_order,
        parent_of,
        found: false,
    }
}
