//! MargaNav: maze exploration for a line-following robot
//!
//! The robot follows a black line through a grid maze, discovers the
//! crossroad graph as it drives, and keeps choosing the exit that leads
//! to the nearest unexplored corridor until the whole maze is mapped.
//!
//! The crate splits into a foreground real-time loop ([`app::MargaApp`]),
//! which centers the robot on the line and watches for crossroad
//! approaches, and a background worker ([`threads::AnalysisThread`]) that
//! owns the [`maze::MazeExplorer`] and turns sweep snapshots into turn
//! decisions. The two sides exchange data only through single-slot
//! [`sync::Handoff`] mailboxes.

pub mod app;
pub mod config;
pub mod control;
pub mod core;
pub mod devices;
pub mod error;
pub mod maze;
pub mod sync;
pub mod threads;

pub use app::MargaApp;
pub use config::MargaConfig;
pub use error::{Error, Result};
