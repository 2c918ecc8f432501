//! Crossroad graph built up during exploration
//!
//! The maze is a grid of corridors meeting at right angles. Every crossroad
//! has four exit slots indexed by absolute direction; a slot is either an
//! unexplored frontier or a measured corridor to another crossroad.
//! Crossroads are keyed by their integer grid position, so re-arriving at a
//! known point resolves to the same node.

use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// Exit slots per crossroad, one per absolute direction
pub const EXIT_COUNT: usize = 4;

/// Absolute direction opposite to `dir`
///
/// Directions are 0..4 counted clockwise, so the opposite is two steps
/// around: `dir ^ 2`.
pub fn reciprocal(dir: u8) -> u8 {
    dir ^ 2
}

/// Integer grid coordinate of a crossroad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    /// Point reached by driving `distance` ticks in absolute direction `dir`
    pub fn advance(self, dir: u8, distance: u32) -> GridPoint {
        let d = distance as i32;
        match dir & 3 {
            0 => GridPoint { x: self.x, y: self.y - d },
            1 => GridPoint { x: self.x + d, y: self.y },
            2 => GridPoint { x: self.x, y: self.y + d },
            _ => GridPoint { x: self.x - d, y: self.y },
        }
    }
}

/// A measured corridor leaving a crossroad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// Index of the crossroad at the far end
    pub to: usize,
    /// Corridor length in odometer ticks
    pub distance: u32,
}

/// One node of the maze graph
#[derive(Debug, Clone)]
pub struct Crossroad {
    pub position: GridPoint,
    /// Explored exits by absolute direction; None is an unexplored frontier
    pub exits: [Option<Exit>; EXIT_COUNT],
}

impl Crossroad {
    fn new(position: GridPoint) -> Self {
        Self {
            position,
            exits: [None; EXIT_COUNT],
        }
    }

    /// Directions whose corridor has not been driven yet
    pub fn frontier_dirs(&self) -> impl Iterator<Item = u8> + '_ {
        self.exits
            .iter()
            .enumerate()
            .filter(|(_, exit)| exit.is_none())
            .map(|(dir, _)| dir as u8)
    }
}

/// Incrementally discovered maze
#[derive(Debug)]
pub struct MazeGraph {
    crossroads: Vec<Crossroad>,
    by_position: HashMap<GridPoint, usize>,
    /// Unexplored exit slots across the whole graph
    frontier_count: usize,
    max_crossroads: usize,
}

impl MazeGraph {
    pub fn new(max_crossroads: usize) -> Self {
        Self {
            crossroads: Vec::new(),
            by_position: HashMap::new(),
            frontier_count: 0,
            max_crossroads,
        }
    }

    pub fn len(&self) -> usize {
        self.crossroads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crossroads.is_empty()
    }

    /// Unexplored exit slots remaining anywhere in the maze
    pub fn frontier_count(&self) -> usize {
        self.frontier_count
    }

    pub fn crossroad(&self, index: usize) -> &Crossroad {
        &self.crossroads[index]
    }

    /// Index of the crossroad at `position`, creating it if unseen
    ///
    /// A new crossroad contributes all four slots to the frontier. Fails
    /// with `MazeFull` when creation would exceed the configured limit.
    pub fn resolve(&mut self, position: GridPoint) -> Result<usize> {
        if let Some(&index) = self.by_position.get(&position) {
            return Ok(index);
        }
        if self.crossroads.len() >= self.max_crossroads {
            return Err(Error::MazeFull {
                limit: self.max_crossroads,
            });
        }
        let index = self.crossroads.len();
        self.crossroads.push(Crossroad::new(position));
        self.by_position.insert(position, index);
        self.frontier_count += EXIT_COUNT;
        debug!(
            "New crossroad {} at ({}, {}), frontier now {}",
            index, position.x, position.y, self.frontier_count
        );
        Ok(index)
    }

    /// Record a driven corridor between two crossroads
    ///
    /// Fills the `from_dir` slot of `from` and the `to_dir` slot of `to`,
    /// retiring both from the frontier. For a straight corridor `to_dir`
    /// is `reciprocal(from_dir)`; a bent corridor arrives wherever the
    /// final heading says. Relinking an already-known slot is a no-op on
    /// the frontier count. `from == to` is legal: a corridor can loop back
    /// to the crossroad it left from.
    pub fn link(&mut self, from: usize, from_dir: u8, to: usize, to_dir: u8, distance: u32) {
        let forward = Exit { to, distance };
        let backward = Exit { to: from, distance };

        if self.crossroads[from].exits[from_dir as usize].is_none() {
            self.frontier_count -= 1;
        }
        self.crossroads[from].exits[from_dir as usize] = Some(forward);

        if self.crossroads[to].exits[to_dir as usize].is_none() {
            self.frontier_count -= 1;
        }
        self.crossroads[to].exits[to_dir as usize] = Some(backward);

        debug!(
            "Linked {}:{} <-> {}:{} length {}, frontier now {}",
            from, from_dir, to, to_dir, distance, self.frontier_count
        );
    }

}
