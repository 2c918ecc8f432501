//! Hardware abstraction for the robot rig
//!
//! The control loop only sees these traits. A real rig would implement
//! them over a serial link; the mock rig replays scripted sweeps for
//! development and testing.

pub mod mock;

pub use mock::MockRig;

use crate::core::Swipe;
use crate::error::Result;

/// Sweeping line sensor with a drive odometer
pub trait LineScanner: Send {
    /// Latest completed sweep, or None when no new sweep is ready
    fn poll_swipe(&mut self) -> Result<Option<Swipe>>;

    /// Cumulative drive distance in encoder ticks; wraps on overflow
    fn odometer(&mut self) -> Result<u32>;
}

/// Differential drive motors
pub trait DriveMotors: Send {
    /// Drive straight ahead at `speed` encoder pulses per second
    fn forward(&mut self, speed: i32) -> Result<()>;

    /// Apply a steering correction around the current speed; positive
    /// steers right
    fn steer(&mut self, correction: f32) -> Result<()>;

    /// Execute a quarter-turn maneuver in place (-1 left, 0 none, 1 right)
    ///
    /// Blocks until the maneuver completes.
    fn turn(&mut self, quarter_turns: i8) -> Result<()>;

    /// Cut power to both motors
    fn stop(&mut self) -> Result<()>;
}

/// Operator kill switch
pub trait AbortSwitch: Send {
    fn is_pressed(&mut self) -> Result<bool>;
}
