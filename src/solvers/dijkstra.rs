use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap, HashSet},
};

use crate::maze::Maze;

use super::{Coord, SearchResult};

/// Heap entry ordered by cumulative cost, with the insertion sequence as
/// tie-breaker so equal-cost cells come back out in FIFO order.
#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    cost: u32,
    seq: u64,
    coord: Coord,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's shortest path from `start` to `end`, weighting each step by
/// the cost of the cell being entered. Distances are tracked in a per-run
/// table reset to "infinite"; a popped cell that is already finalized is
/// skipped, so stale heap entries cannot be visited twice. Stops the
/// moment `end` is popped.
pub(super) fn search(maze: &Maze, start: Coord, end: Coord) -> SearchResult {
    let width = maze.width() as usize;
    let ravel = |(x, y): Coord| y as usize * width + x as usize;
    let mut dist = vec![u32::MAX; width * maze.height() as usize];
    dist[ravel(start)] = 0;

    let mut seq = 0u64;
    let mut heap = BinaryHeap::new();
    heap.push(Reverse(QueueEntry {
        cost: 0,
        seq,
        coord: start,
    }));
    let mut finalized = HashSet::new();
    let mut visit_order = Vec::new();
    let mut parent_of = HashMap::new();

    while let Some(Reverse(entry)) = heap.pop() {
        let current = entry.coord;
        if !finalized.insert(current) {
            // Stale heap entry, the cell already popped at a lower cost.
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
            let Some(step) = maze[neighbor].cost() else {
                continue;
            };
            let next_cost = entry.cost.saturating_add(step);
            if next_cost < dist[ravel(neighbor)] {
                dist[ravel(neighbor)] = next_cost;
                parent_of.insert(neighbor, current);
                seq += 1;
                heap.push(Reverse(QueueEntry {
                    cost: next_cost,
                    seq,
                    coord: neighbor,
                }));
            }
        }
    }

    SearchResult {
        visit_order,
        parent_of,
        found: false,
    }
}
