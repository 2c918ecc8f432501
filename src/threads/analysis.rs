//! Background crossroad analysis
//!
//! Owns the `MazeExplorer` outright; the control loop only talks to it
//! through the two handoffs. The explorer runs inside the receive
//! callback, so the input slot stays locked for the whole analysis and
//! the control loop's `try_send` fails fast instead of queueing stale
//! snapshots behind a busy worker.

use crate::core::SwipeSnapshot;
use crate::maze::{Decision, MazeExplorer};
use crate::sync::Handoff;
use log::{debug, error, info};
use std::sync::Arc;

/// Worker loop around the explorer
pub struct AnalysisThread {
    explorer: MazeExplorer,
    input: Arc<Handoff<SwipeSnapshot>>,
    output: Arc<Handoff<Decision>>,
}

impl AnalysisThread {
    pub fn new(
        explorer: MazeExplorer,
        input: Arc<Handoff<SwipeSnapshot>>,
        output: Arc<Handoff<Decision>>,
    ) -> Self {
        Self {
            explorer,
            input,
            output,
        }
    }

    /// Process snapshots until the input handoff is canceled
    pub fn run(mut self) {
        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);
        loop {
            let explorer = &mut self.explorer;
            let delivered = input.recv_once(|snapshot| {
                Self::analyze(explorer, &output, snapshot);
            });
            if !delivered {
                break;
            }
        }
        info!(
            "Analysis stopped: {} crossroads mapped, {} inconsistencies",
            self.explorer.maze().len(),
            self.explorer.inconsistencies()
        );
    }

    fn analyze(explorer: &mut MazeExplorer, output: &Handoff<Decision>, snapshot: SwipeSnapshot) {
        debug!(
            "Analyzing snapshot: {} swipes, {} ticks since last event",
            snapshot.swipes.len(),
            snapshot.distance
        );
        let decision = match explorer.notify_crossroad(snapshot.distance) {
            Ok(decision) => decision,
            Err(e) => {
                error!("Crossroad analysis failed: {}", e);
                Decision::Terminate
            }
        };
        // The maneuver itself covers no corridor distance.
        if let Some(turn) = decision.turn() {
            explorer.notify_turn(turn, 0);
        }
        if !output.send(decision) {
            debug!("Decision dropped, output handoff canceled");
        }
    }
}
