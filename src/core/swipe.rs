//! Classified line-sensor sweeps
//!
//! The sensing layer sweeps a color sensor across the track and delivers
//! each sweep already median-blurred and thresholded to black/white. This
//! module only derives geometry from those classified samples.

use super::history::History;

/// One sample of a sweep: lateral head position and line classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeSample {
    /// Lateral offset along the sweep, in sensor-motor ticks
    pub offset: i32,
    /// True when the sample saw the line
    pub on_track: bool,
}

/// A completed sweep of the sensor head
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Swipe {
    pub samples: Vec<SwipeSample>,
}

impl Swipe {
    pub fn new(samples: Vec<SwipeSample>) -> Self {
        Self { samples }
    }

    /// Leftmost and rightmost on-track offsets, or None when the sweep saw
    /// no line at all
    pub fn track_span(&self) -> Option<(i32, i32)> {
        let mut span: Option<(i32, i32)> = None;
        for sample in &self.samples {
            if sample.on_track {
                span = Some(match span {
                    None => (sample.offset, sample.offset),
                    Some((lo, hi)) => (lo.min(sample.offset), hi.max(sample.offset)),
                });
            }
        }
        span
    }

    /// Width of the on-track span
    pub fn track_width(&self) -> Option<i32> {
        self.track_span().map(|(lo, hi)| hi - lo)
    }

    /// Center of the on-track span, the input to line centering
    pub fn line_center(&self) -> Option<i32> {
        self.track_span().map(|(lo, hi)| (lo + hi) / 2)
    }
}

/// Snapshot handed to the analysis thread when a crossroad is suspected
#[derive(Debug, Clone)]
pub struct SwipeSnapshot {
    /// Recent sweeps, oldest first
    pub swipes: History<Swipe>,
    /// Odometer ticks accumulated since the previous dispatch
    pub distance: u32,
}
