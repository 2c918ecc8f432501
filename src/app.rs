//! Application orchestration
//!
//! Wires the foreground control loop to the background analysis worker
//! and the abort watcher. The foreground never blocks: it polls sweeps,
//! keeps the robot centered on the line, and exchanges snapshots and
//! decisions with the worker through non-blocking handoff calls only.

use crate::config::MargaConfig;
use crate::control::{Pid, WideningDetector};
use crate::core::{History, Swipe, SwipeSnapshot};
use crate::devices::{AbortSwitch, DriveMotors, LineScanner};
use crate::error::{Error, Result};
use crate::maze::{Decision, MazeExplorer};
use crate::sync::{CancelToken, Handoff};
use crate::threads::{self, AnalysisThread};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// The maze-running application
pub struct MargaApp<S, M> {
    config: MargaConfig,
    scanner: S,
    motors: M,
    token: CancelToken,
    input: Arc<Handoff<SwipeSnapshot>>,
    output: Arc<Handoff<Decision>>,
}

impl<S: LineScanner, M: DriveMotors> MargaApp<S, M> {
    pub fn new(config: MargaConfig, scanner: S, motors: M, token: CancelToken) -> Self {
        Self {
            config,
            scanner,
            motors,
            token,
            input: Arc::new(Handoff::new()),
            output: Arc::new(Handoff::new()),
        }
    }

    fn check(&self) -> Result<()> {
        let sensor = &self.config.sensor;
        if sensor.swipe_history == 0 {
            return Err(Error::Config("swipe_history must be non-zero".to_string()));
        }
        if self.config.drive.cruise_speed <= 0 {
            return Err(Error::Config("cruise_speed must be positive".to_string()));
        }
        if self.config.explorer.max_crossroads == 0 {
            return Err(Error::Config("max_crossroads must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Run exploration until the maze is mapped or the run is aborted
    ///
    /// Shutdown order matters: the loop exits, both handoffs are canceled
    /// to unblock the worker, the token stops the abort watcher, both
    /// threads are joined, and only then are the motors stopped.
    pub fn run<A>(mut self, switch: A) -> Result<()>
    where
        A: AbortSwitch + 'static,
    {
        self.check()?;

        let explorer = MazeExplorer::new(
            self.config.explorer.max_crossroads,
            self.config.explorer.rng_seed,
        );
        let analysis =
            AnalysisThread::new(explorer, Arc::clone(&self.input), Arc::clone(&self.output));
        let workers = threads::spawn(analysis, switch, self.token.clone())?;

        info!("Exploration started");
        let result = self.control_loop();

        self.input.cancel();
        self.output.cancel();
        self.token.cancel();
        workers.join();
        self.motors.stop()?;
        info!("Motors stopped, shutdown complete");
        result
    }

    /// Foreground real-time loop
    fn control_loop(&mut self) -> Result<()> {
        let drive = self.config.drive.clone();
        let sensor = self.config.sensor.clone();
        let tick = Duration::from_millis(sensor.tick_interval_ms);

        let mut history: History<Swipe> = History::new(sensor.swipe_history);
        let mut detector = WideningDetector::new(sensor.widening_run);
        let mut pid = Pid::new(
            drive.pid_gain,
            drive.pid_ti,
            drive.pid_td,
            drive.pid_update_rate,
        );
        let mut event_odometer = self.scanner.odometer()?;

        self.motors.forward(drive.cruise_speed)?;
        loop {
            if self.token.is_canceled() {
                info!("Run aborted");
                return Ok(());
            }

            // A pending decision outranks fresh sweeps.
            if let Some(decision) = self.output.try_recv() {
                match decision.turn() {
                    None => {
                        info!("Maze fully mapped, terminating");
                        return Ok(());
                    }
                    Some(turn) => {
                        self.motors.turn(turn)?;
                        self.motors.forward(drive.cruise_speed)?;
                        pid.reset();
                        detector.reset();
                        // Corridor distance restarts at the maneuver.
                        event_odometer = self.scanner.odometer()?;
                    }
                }
                continue;
            }

            if let Some(swipe) = self.scanner.poll_swipe()? {
                match (swipe.line_center(), swipe.track_width()) {
                    (Some(center), Some(width)) => {
                        self.motors.steer(pid.update(center as f32))?;
                        let approaching = detector.observe(width);
                        history.push(swipe);
                        if approaching {
                            self.dispatch_snapshot(&history, &mut event_odometer)?;
                        }
                    }
                    _ => {
                        warn!("Sweep lost the line");
                        self.motors.steer(0.0)?;
                        history.push(swipe);
                    }
                }
            }

            std::thread::sleep(tick);
        }
    }

    /// Hand the recent sweep history to the analysis worker
    ///
    /// Dropped without retry when the worker is still busy; the next
    /// widening run will dispatch again with fresher data.
    fn dispatch_snapshot(
        &mut self,
        history: &History<Swipe>,
        event_odometer: &mut u32,
    ) -> Result<()> {
        let odometer = self.scanner.odometer()?;
        let snapshot = SwipeSnapshot {
            swipes: history.clone(),
            distance: odometer.wrapping_sub(*event_odometer),
        };
        if self.input.try_send(snapshot) {
            *event_odometer = odometer;
            debug!("Snapshot dispatched at odometer {}", odometer);
        } else {
            debug!("Analysis busy, snapshot dropped");
        }
        Ok(())
    }
}
