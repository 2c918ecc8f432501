//! Abort switch watcher
//!
//! Polls the operator kill switch and trips the shared cancel token on a
//! press. Polling at 100 ms keeps the worst-case reaction well under the
//! time the robot needs to leave the track.

use crate::devices::AbortSwitch;
use crate::sync::CancelToken;
use log::{error, info};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll `switch` until it is pressed or the token is canceled elsewhere
pub fn watch<S: AbortSwitch>(mut switch: S, token: CancelToken) {
    while !token.is_canceled() {
        match switch.is_pressed() {
            Ok(true) => {
                info!("Abort switch pressed, canceling");
                token.cancel();
                break;
            }
            Ok(false) => {}
            Err(e) => {
                // A dead switch means no way to stop the robot by hand.
                error!("Abort switch failed ({}), canceling", e);
                token.cancel();
                break;
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
