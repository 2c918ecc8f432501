//! Nearest-frontier search over the known maze
//!
//! Dijkstra over the explored subgraph, stopping at the first crossroad
//! popped that still has an unexplored exit. Edge weights are corridor
//! lengths, all non-negative, so the first frontier popped is the nearest.

use super::graph::MazeGraph;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Distance to the nearest frontier crossroad reachable from `start`
///
/// `start_cost` seeds the search with the corridor length already paid to
/// reach `start`. Returns None when no frontier crossroad is reachable,
/// which on a consistent maze can only happen once everything is linked.
pub fn nearest_frontier(maze: &MazeGraph, start: usize, start_cost: u64) -> Option<u64> {
    let mut best = vec![u64::MAX; maze.len()];
    let mut heap = BinaryHeap::new();

    best[start] = start_cost;
    heap.push(Reverse((start_cost, start)));

    while let Some(Reverse((cost, index))) = heap.pop() {
        if cost > best[index] {
            continue; // stale entry
        }
        let crossroad = maze.crossroad(index);
        if crossroad.frontier_dirs().next().is_some() {
            return Some(cost);
        }
        for exit in crossroad.exits.iter().flatten() {
            let next_cost = cost + u64::from(exit.distance);
            if next_cost < best[exit.to] {
                best[exit.to] = next_cost;
                heap.push(Reverse((next_cost, exit.to)));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::graph::GridPoint;

    fn grid(x: i32, y: i32) -> GridPoint {
        GridPoint { x, y }
    }

    #[test]
    fn start_is_its_own_nearest_frontier() {
        let mut maze = MazeGraph::new(10);
        let a = maze.resolve(grid(0, 0)).unwrap();
        assert_eq!(nearest_frontier(&maze, a, 5), Some(5));
    }

    #[test]
    fn search_crosses_linked_corridors() {
        // a --10-- b --3-- c, where only c keeps a frontier slot
        let mut maze = MazeGraph::new(10);
        let a = maze.resolve(grid(0, 0)).unwrap();
        let b = maze.resolve(grid(10, 0)).unwrap();
        let c = maze.resolve(grid(13, 0)).unwrap();
        maze.link(a, 1, b, 3, 10);
        maze.link(b, 1, c, 3, 3);
        maze.link(a, 0, a, 2, 1); // close every slot of a and b except the
        maze.link(b, 0, b, 2, 1); // corridors above, so only c stays open
        maze.link(a, 3, c, 1, 99);
        assert_eq!(nearest_frontier(&maze, a, 0), Some(13));
        assert_eq!(nearest_frontier(&maze, b, 2), Some(5));
    }

    #[test]
    fn fully_linked_maze_has_no_frontier() {
        let mut maze = MazeGraph::new(10);
        let a = maze.resolve(grid(0, 0)).unwrap();
        maze.link(a, 0, a, 2, 4);
        maze.link(a, 1, a, 3, 4);
        assert_eq!(maze.frontier_count(), 0);
        assert_eq!(nearest_frontier(&maze, a, 0), None);
    }
}
