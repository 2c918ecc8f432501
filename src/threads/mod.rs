//! Worker threads around the control loop.

pub mod abort;
pub mod analysis;

pub use analysis::AnalysisThread;

use crate::devices::AbortSwitch;
use crate::error::Result;
use crate::sync::CancelToken;
use log::error;
use std::thread::JoinHandle;

/// Handles to the spawned worker threads
pub struct Workers {
    analysis: JoinHandle<()>,
    abort: JoinHandle<()>,
}

impl Workers {
    /// Wait for both workers to exit
    ///
    /// Callers cancel the handoffs and the token first, otherwise the
    /// analysis worker may block forever.
    pub fn join(self) {
        if self.analysis.join().is_err() {
            error!("Analysis thread panicked");
        }
        if self.abort.join().is_err() {
            error!("Abort watcher panicked");
        }
    }
}

/// Spawn the analysis worker and the abort watcher
pub fn spawn<S>(analysis: AnalysisThread, switch: S, token: CancelToken) -> Result<Workers>
where
    S: AbortSwitch + 'static,
{
    let analysis = std::thread::Builder::new()
        .name("analysis".to_string())
        .spawn(move || analysis.run())?;
    let abort = std::thread::Builder::new()
        .name("abort-watch".to_string())
        .spawn(move || abort::watch(switch, token))?;
    Ok(Workers { analysis, abort })
}
