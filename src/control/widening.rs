//! Crossroad approach detection
//!
//! A crossroad shows up in the sweep data as the line getting wider: the
//! perpendicular corridor joins the one being followed. The detector
//! watches track widths and triggers after a run of strictly increasing
//! measurements, long enough to reject single-sweep noise.

/// Strictly-increasing-width run detector
#[derive(Debug)]
pub struct WideningDetector {
    /// Run length that triggers, counting the first sample of the run
    run: usize,
    last_width: Option<i32>,
    streak: usize,
}

impl WideningDetector {
    pub fn new(run: usize) -> Self {
        Self {
            run: run.max(2),
            last_width: None,
            streak: 0,
        }
    }

    /// Feed one track width; true when a widening run just completed
    ///
    /// Triggering resets the detector, so one approach fires once.
    pub fn observe(&mut self, width: i32) -> bool {
        let widened = match self.last_width {
            Some(last) => width > last,
            None => false,
        };
        self.last_width = Some(width);
        if widened {
            self.streak += 1;
            if self.streak + 1 >= self.run {
                self.reset();
                return true;
            }
        } else {
            self.streak = 0;
        }
        false
    }

    /// Forget the run in progress, e.g. after a maneuver or a dropped
    /// snapshot, so stale widths cannot retrigger
    pub fn reset(&mut self) {
        self.last_width = None;
        self.streak = 0;
    }
}
