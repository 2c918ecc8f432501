//! Maze discovery: crossroad graph, frontier search, and exit choice.

pub mod explorer;
pub mod frontier;
pub mod graph;

pub use explorer::{Decision, MazeExplorer};
pub use graph::{Crossroad, Exit, GridPoint, MazeGraph};
