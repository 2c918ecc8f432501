//! PID line centering
//!
//! Steers by differential speed so the line center stays under the middle
//! of the sweep. Classic positional PID with the integral accumulated in
//! the error sum and the derivative taken on the error.

/// Positional PID controller
#[derive(Debug)]
pub struct Pid {
    gain: f32,
    /// Integral time constant; larger means weaker integral action
    ti: f32,
    /// Derivative time constant
    td: f32,
    /// Controller update rate in Hz
    update_rate: f32,
    error_sum: f32,
    last_error: f32,
}

impl Pid {
    pub fn new(gain: f32, ti: f32, td: f32, update_rate: f32) -> Self {
        Self {
            gain,
            ti,
            td,
            update_rate,
            error_sum: 0.0,
            last_error: 0.0,
        }
    }

    /// Advance one control period with the measured error
    ///
    /// Returns the correction to apply, already negated so a positive
    /// error (line right of center) steers right.
    pub fn update(&mut self, error: f32) -> f32 {
        self.error_sum += error / self.update_rate;
        let derivative = (error - self.last_error) * self.update_rate;
        self.last_error = error;
        let out = error + self.error_sum / self.ti + derivative * self.td;
        -self.gain * out
    }

    /// Clear accumulated state, e.g. after a turn maneuver
    pub fn reset(&mut self) {
        self.error_sum = 0.0;
        self.last_error = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_error_yields_zero_output() {
        let mut pid = Pid::new(0.5, 10.0, 15.0, 100.0);
        assert_eq!(pid.update(0.0), 0.0);
        assert_eq!(pid.update(0.0), 0.0);
    }

    #[test]
    fn output_opposes_the_error() {
        let mut pid = Pid::new(0.5, 10.0, 15.0, 100.0);
        assert!(pid.update(10.0) < 0.0);
        pid.reset();
        assert!(pid.update(-10.0) > 0.0);
    }

    #[test]
    fn integral_accumulates_constant_error() {
        let mut pid = Pid::new(1.0, 1.0, 0.0, 1.0);
        let first = pid.update(1.0);
        let second = pid.update(1.0);
        // same proportional term, growing integral, derivative gone
        assert!(second < first);
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = Pid::new(0.5, 10.0, 15.0, 100.0);
        pid.update(20.0);
        pid.reset();
        assert_eq!(pid.update(0.0), 0.0);
    }
}
