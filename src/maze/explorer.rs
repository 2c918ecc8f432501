//! Incremental maze exploration
//!
//! The explorer dead-reckons the robot's grid position from reported turns
//! and distances, grows the crossroad graph as intersections are reached,
//! and picks the next exit to drive. Unexplored exits at the current
//! crossroad are taken first (uniformly at random); once all are known it
//! heads for the nearest frontier crossroad by shortest known path.
//! Exploration terminates when no frontier slot remains anywhere.

use super::frontier::nearest_frontier;
use super::graph::{reciprocal, GridPoint, MazeGraph, EXIT_COUNT};
use crate::error::Result;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Relative maneuver for the drive layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Every exit of every crossroad is mapped; stop exploring
    Terminate,
    TurnLeft,
    Straight,
    TurnRight,
}

impl Decision {
    /// Signed quarter-turn, None for Terminate
    pub fn turn(self) -> Option<i8> {
        match self {
            Decision::Terminate => None,
            Decision::TurnLeft => Some(-1),
            Decision::Straight => Some(0),
            Decision::TurnRight => Some(1),
        }
    }

    fn from_turn(turn: i8) -> Decision {
        match turn {
            -1 => Decision::TurnLeft,
            1 => Decision::TurnRight,
            _ => Decision::Straight,
        }
    }
}

/// Maze discovery and direction choice
///
/// Owned by the analysis thread; never shared.
pub struct MazeExplorer {
    maze: MazeGraph,
    position: GridPoint,
    /// Absolute direction of travel, 0..4 clockwise
    heading: u8,
    /// Ticks accumulated since the last crossroad, across bends
    distance: u32,
    /// Departure exit of the last crossroad, linked on the next arrival
    pending: Option<(usize, u8)>,
    rng: SmallRng,
    terminated: bool,
    /// Frontier searches that found nothing despite open frontier slots
    inconsistencies: u32,
}

impl MazeExplorer {
    /// Create an explorer at the grid origin facing direction 0
    ///
    /// `seed` pins the random unexplored-exit choice for reproducible runs.
    pub fn new(max_crossroads: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            maze: MazeGraph::new(max_crossroads),
            position: GridPoint::ORIGIN,
            heading: 0,
            distance: 0,
            pending: None,
            rng,
            terminated: false,
            inconsistencies: 0,
        }
    }

    pub fn maze(&self) -> &MazeGraph {
        &self.maze
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn heading(&self) -> u8 {
        self.heading
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Failed frontier searches observed so far
    pub fn inconsistencies(&self) -> u32 {
        self.inconsistencies
    }

    /// Record a quarter-turn executed after driving `distance` ticks
    ///
    /// Projects `distance` along the current heading first, then applies
    /// `turn` (-1 left, 0 none, 1 right) to the heading. The distance
    /// accumulates into the running corridor length.
    pub fn notify_turn(&mut self, turn: i8, distance: u32) {
        self.distance = self.distance.saturating_add(distance);
        self.position = self.position.advance(self.heading, distance);
        self.heading = (i16::from(self.heading) + i16::from(turn)).rem_euclid(4) as u8;
    }

    /// Record arrival at a crossroad and decide where to go next
    ///
    /// `distance` is the odometer ticks driven since the previous turn or
    /// crossroad event. The corridor weight is the full accumulated length
    /// since the previous crossroad, bends included. The returned turn is
    /// relative to the current heading and is never a reversal. The caller
    /// reports the executed maneuver back through `notify_turn`.
    pub fn notify_crossroad(&mut self, distance: u32) -> Result<Decision> {
        if self.terminated {
            return Ok(Decision::Terminate);
        }
        self.notify_turn(0, distance);

        let node = self.maze.resolve(self.position)?;
        if let Some((prev, prev_dir)) = self.pending.take() {
            if self.maze.crossroad(prev).exits[prev_dir as usize].is_none() {
                // A bent corridor arrives wherever the final heading says,
                // not necessarily opposite the departure exit.
                let arrival_dir = reciprocal(self.heading);
                self.maze
                    .link(prev, prev_dir, node, arrival_dir, self.distance);
            }
        }

        if self.maze.frontier_count() == 0 {
            self.terminated = true;
            info!(
                "Maze fully mapped: {} crossroads, {} inconsistencies",
                self.maze.len(),
                self.inconsistencies
            );
            return Ok(Decision::Terminate);
        }

        let new_dir = self.choose_exit(node);
        self.pending = Some((node, new_dir));
        self.distance = 0;
        let turn = ((new_dir + 4 - self.heading + 1) & 3) as i8 - 1;
        debug!(
            "Crossroad {} at ({}, {}): heading {}, taking exit {} (turn {})",
            node, self.position.x, self.position.y, self.heading, new_dir, turn
        );
        Ok(Decision::from_turn(turn))
    }

    /// Pick the departure direction at `node`, excluding the arrival exit
    fn choose_exit(&mut self, node: usize) -> u8 {
        let arrival = reciprocal(self.heading);
        let candidates: Vec<u8> = (0..EXIT_COUNT as u8).filter(|&d| d != arrival).collect();

        let unexplored: Vec<u8> = candidates
            .iter()
            .copied()
            .filter(|&d| self.maze.crossroad(node).exits[d as usize].is_none())
            .collect();
        if !unexplored.is_empty() {
            return unexplored[self.rng.gen_range(0..unexplored.len())];
        }

        // All three candidates are known corridors: head for the nearest
        // frontier crossroad reachable through each and take the cheapest.
        let mut best: Option<(u64, u8)> = None;
        for &dir in &candidates {
            if let Some(exit) = self.maze.crossroad(node).exits[dir as usize] {
                if let Some(cost) = nearest_frontier(&self.maze, exit.to, u64::from(exit.distance))
                {
                    if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                        best = Some((cost, dir));
                    }
                }
            }
        }

        match best {
            Some((_, dir)) => dir,
            None => {
                // Open frontier slots exist but none is reachable from here.
                // The map and the track disagree; press on straight ahead.
                self.inconsistencies += 1;
                warn!(
                    "No reachable frontier from crossroad {} while {} slots remain open",
                    node,
                    self.maze.frontier_count()
                );
                self.heading
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_crossroad_creates_the_origin_node() {
        let mut explorer = MazeExplorer::new(100, Some(42));
        let decision = explorer.notify_crossroad(10).unwrap();

        assert_eq!(explorer.maze.len(), 1);
        assert_eq!(explorer.maze.frontier_count(), 4);
        assert_eq!(explorer.position, GridPoint { x: 0, y: -10 });

        // never a reversal: the three candidates map to turns -1, 0, 1
        let turn = decision.turn().unwrap();
        assert!((-1..=1).contains(&turn));
        let (_, pending_dir) = explorer.pending.unwrap();
        assert_ne!(pending_dir, reciprocal(explorer.heading));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = MazeExplorer::new(100, Some(7));
        let mut b = MazeExplorer::new(100, Some(7));
        assert_eq!(
            a.notify_crossroad(10).unwrap(),
            b.notify_crossroad(10).unwrap()
        );
    }

    #[test]
    fn two_node_corridor_terminates() {
        let mut explorer = MazeExplorer::new(100, Some(3));

        // First crossroad A; the departure exit d1 is random among the
        // three non-arrival slots.
        explorer.notify_crossroad(10).unwrap();
        let a = 0;
        let (_, d1) = explorer.pending.unwrap();
        let turn = ((d1 + 4 - explorer.heading + 1) & 3) as i8 - 1;
        explorer.notify_turn(turn, 0);
        assert_eq!(explorer.heading, d1);

        // Crossroad B will appear 10 ticks ahead. Pre-create it and seal
        // its two perpendicular slots as dead ends, leaving straight-on as
        // the only unexplored candidate.
        let b_pos = explorer.position.advance(d1, 10);
        let b = explorer.maze.resolve(b_pos).unwrap();
        explorer.maze.link(b, (d1 + 1) & 3, b, (d1 + 3) & 3, 1);

        let decision = explorer.notify_crossroad(10).unwrap();
        assert_eq!(decision, Decision::Straight);
        assert_eq!(explorer.maze.crossroad(a).exits[d1 as usize].unwrap().to, b);
        assert_eq!(
            explorer.maze.crossroad(b).exits[reciprocal(d1) as usize],
            Some(super::super::graph::Exit { to: a, distance: 10 })
        );
        explorer.notify_turn(0, 0);

        // Drive a U-shaped corridor from B back into A, arriving with the
        // same heading d1 so the link lands on A's reciprocal slot.
        explorer.notify_turn(1, 0);
        explorer.notify_turn(1, 5);
        explorer.notify_turn(1, 10);
        explorer.notify_turn(1, 5);
        assert_eq!(explorer.heading, d1);
        assert_eq!(
            explorer.position,
            explorer.maze.crossroad(a).position.advance(d1, 0)
        );

        // Seal A's two remaining side slots; the final link must then
        // empty the frontier.
        explorer.maze.link(a, (d1 + 1) & 3, a, (d1 + 3) & 3, 1);
        assert_eq!(explorer.maze.frontier_count(), 2);

        let decision = explorer.notify_crossroad(0).unwrap();
        assert_eq!(decision, Decision::Terminate);
        assert!(explorer.is_terminated());
        assert_eq!(explorer.maze.frontier_count(), 0);

        // Every exit is linked symmetrically with a consistent distance.
        for index in 0..explorer.maze.len() {
            for (dir, exit) in explorer.maze.crossroad(index).exits.iter().enumerate() {
                let exit = exit.expect("all exits linked after termination");
                let back = explorer.maze.crossroad(exit.to).exits[reciprocal(dir as u8) as usize]
                    .expect("reciprocal exit linked");
                assert_eq!(back.to, index);
                assert_eq!(back.distance, exit.distance);
            }
        }

        // Terminated explorers keep answering Terminate.
        assert_eq!(explorer.notify_crossroad(5).unwrap(), Decision::Terminate);
    }

    #[test]
    fn fully_known_node_picks_the_nearest_frontier() {
        let mut explorer = MazeExplorer::new(100, Some(1));
        let maze = &mut explorer.maze;

        let a = maze.resolve(GridPoint { x: 0, y: 0 }).unwrap();
        let b = maze.resolve(GridPoint { x: 10, y: 0 }).unwrap();
        let c = maze.resolve(GridPoint { x: 0, y: 20 }).unwrap();
        maze.link(a, 1, b, 3, 10);
        maze.link(a, 3, b, 1, 30);
        maze.link(a, 2, c, 0, 20);
        maze.link(a, 0, b, 2, 50);
        maze.link(b, 0, c, 2, 5);
        // C is the only frontier crossroad (slots 1 and 3 open)
        assert_eq!(maze.frontier_count(), 2);

        // Arrive at A heading south, so slot 0 is the excluded reversal.
        explorer.position = GridPoint { x: 0, y: 0 };
        explorer.heading = 2;

        // Shortest paths to C per candidate: exit 1 costs 10+5=15 via B,
        // exit 2 costs 20 direct, exit 3 costs 30+5=35 via B.
        let decision = explorer.notify_crossroad(0).unwrap();
        assert_eq!(decision, Decision::TurnLeft);
        assert_eq!(explorer.pending, Some((a, 1)));
        assert_eq!(explorer.inconsistencies(), 0);
    }

    #[test]
    fn unreachable_frontier_falls_back_to_straight() {
        let mut explorer = MazeExplorer::new(100, Some(1));
        let maze = &mut explorer.maze;

        // A is fully self-linked; D is open but disconnected.
        let a = maze.resolve(GridPoint { x: 0, y: 0 }).unwrap();
        maze.link(a, 0, a, 2, 1);
        maze.link(a, 1, a, 3, 1);
        maze.resolve(GridPoint { x: 50, y: 50 }).unwrap();
        assert_eq!(maze.frontier_count(), 4);

        explorer.position = GridPoint { x: 0, y: 0 };
        explorer.heading = 0;

        let decision = explorer.notify_crossroad(0).unwrap();
        assert_eq!(decision, Decision::Straight);
        assert_eq!(explorer.inconsistencies(), 1);
    }

    #[test]
    fn crossroad_limit_surfaces_as_an_error() {
        let mut explorer = MazeExplorer::new(1, Some(1));
        explorer.notify_crossroad(10).unwrap();
        explorer.notify_turn(0, 0);
        let err = explorer.notify_crossroad(10).unwrap_err();
        assert!(matches!(err, crate::error::Error::MazeFull { limit: 1 }));
    }
}
