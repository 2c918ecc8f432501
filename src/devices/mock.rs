//! Scripted mock rig
//!
//! Replays a canned sequence of sweeps, advances the odometer a fixed
//! number of ticks per sweep, and presses the abort switch once the
//! script runs out. Clones share one underlying rig, so the scanner,
//! motors, and switch handed to different threads stay consistent.

use super::{AbortSwitch, DriveMotors, LineScanner};
use crate::core::{Swipe, SwipeSample};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Lateral sweep range of the mock sensor head, in ticks
const SWEEP_RANGE: i32 = 80;
/// Sample spacing across the sweep
const SWEEP_STEP: i32 = 10;

#[derive(Debug, Default)]
struct RigState {
    script: VecDeque<Swipe>,
    odometer: u32,
    ticks_per_swipe: u32,
    speed: i32,
    corrections: Vec<f32>,
    turns: Vec<i8>,
    stopped: bool,
    abort_pressed: bool,
    /// Press the abort switch when the script is exhausted
    abort_on_empty: bool,
}

/// Shared scripted rig implementing all three device traits
#[derive(Clone, Debug)]
pub struct MockRig {
    state: Arc<Mutex<RigState>>,
}

impl MockRig {
    /// Empty rig advancing the odometer `ticks_per_swipe` per sweep
    pub fn new(ticks_per_swipe: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(RigState {
                ticks_per_swipe,
                ..RigState::default()
            })),
        }
    }

    /// Press the abort switch automatically once the script runs dry
    pub fn abort_on_empty(self) -> Self {
        self.state.lock().abort_on_empty = true;
        self
    }

    /// Append one sweep seeing a line of `width` centered at `center`
    pub fn push_track_swipe(&self, center: i32, width: i32) {
        self.state.lock().script.push_back(track_swipe(center, width));
    }

    /// Append a sweep that sees no line at all
    pub fn push_lost_swipe(&self) {
        self.state.lock().script.push_back(track_swipe(0, -1));
    }

    /// Append a straight corridor segment: `count` sweeps of equal width
    pub fn push_corridor(&self, count: usize, width: i32) {
        for _ in 0..count {
            self.push_track_swipe(0, width);
        }
    }

    /// Append a crossroad approach: strictly widening sweeps
    ///
    /// Widths grow by two sample steps per sweep so the measured span
    /// widens on every sweep despite sample quantization.
    pub fn push_widening(&self, count: usize, start_width: i32) {
        for i in 0..count {
            self.push_track_swipe(0, start_width + (i as i32 + 1) * 2 * SWEEP_STEP);
        }
    }

    pub fn press_abort(&self) {
        self.state.lock().abort_pressed = true;
    }

    /// Quarter-turns commanded so far
    pub fn turns(&self) -> Vec<i8> {
        self.state.lock().turns.clone()
    }

    /// Steering corrections commanded so far
    pub fn corrections(&self) -> Vec<f32> {
        self.state.lock().corrections.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    pub fn speed(&self) -> i32 {
        self.state.lock().speed
    }
}

/// Sweep across the full range with on-track samples spanning `width`
/// around `center`; a negative width yields a lost sweep
fn track_swipe(center: i32, width: i32) -> Swipe {
    let mut samples = Vec::new();
    let mut offset = -SWEEP_RANGE;
    while offset <= SWEEP_RANGE {
        samples.push(SwipeSample {
            offset,
            on_track: (offset - center).abs() * 2 <= width,
        });
        offset += SWEEP_STEP;
    }
    Swipe::new(samples)
}

impl LineScanner for MockRig {
    fn poll_swipe(&mut self) -> Result<Option<Swipe>> {
        let mut state = self.state.lock();
        match state.script.pop_front() {
            Some(swipe) => {
                state.odometer = state.odometer.wrapping_add(state.ticks_per_swipe);
                Ok(Some(swipe))
            }
            None => {
                if state.abort_on_empty {
                    state.abort_pressed = true;
                }
                Ok(None)
            }
        }
    }

    fn odometer(&mut self) -> Result<u32> {
        Ok(self.state.lock().odometer)
    }
}

impl DriveMotors for MockRig {
    fn forward(&mut self, speed: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.speed = speed;
        state.stopped = false;
        Ok(())
    }

    fn steer(&mut self, correction: f32) -> Result<()> {
        self.state.lock().corrections.push(correction);
        Ok(())
    }

    fn turn(&mut self, quarter_turns: i8) -> Result<()> {
        self.state.lock().turns.push(quarter_turns);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.speed = 0;
        state.stopped = true;
        Ok(())
    }
}

impl AbortSwitch for MockRig {
    fn is_pressed(&mut self) -> Result<bool> {
        Ok(self.state.lock().abort_pressed)
    }
}
