use std::collections::{HashMap, HashSet, VecDeque};

use crate::maze::Maze;

use super::{Coord, SearchResult};

/// Breadth-first search from `start` to `end`. Cells are marked visited
/// when enqueued so each enters the queue at most once; the visit order
/// records cells as they are dequeued. Stops the moment `end` is dequeued,
/// without expanding its neighbors.
pub(super) fn search(maze: &Maze, start: Coord, end: Coord) -> SearchResult {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut visit_order = Vec::new();
    let mut parent_of = HashMap::new();

    while let Some(current) = queue.pop_front() {
        visit_order.push(current);
        if current == end {
            return SearchResult {
                visit_order,
                parent_of,
                found: true,
            };
        }
        for neighbor in maze.passable_neighbors(current) {
            if visited.insert(neighbor) {
                parent_of.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    SearchResult {
        visit_order,
        parent_of,
        found: false,
    }
}
