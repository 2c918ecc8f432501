//! Single-slot handoff between the control loop and a worker
//!
//! A mailbox holding at most one pending value. Senders overwrite: only the
//! latest value matters, stale work is dropped rather than queued. The
//! receiver parks until a value arrives or the handoff is canceled.
//!
//! The slot lock is held for the whole duration of the receive callback, so
//! `try_send` from the real-time side fails fast while the worker is still
//! busy with the previous value. That failure is the backpressure signal.

use parking_lot::{Condvar, Mutex};

struct Slot<T> {
    value: Option<T>,
    canceled: bool,
}

/// Last-write-wins single-value mailbox
pub struct Handoff<T> {
    slot: Mutex<Slot<T>>,
    available: Condvar,
}

impl<T> Default for Handoff<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Handoff<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                canceled: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Deposit a value without blocking
    ///
    /// Overwrites any value not yet consumed. Returns false when the slot
    /// lock is contended (a receiver is mid-callback) or the handoff is
    /// canceled; the value is dropped in both cases.
    pub fn try_send(&self, value: T) -> bool {
        let mut slot = match self.slot.try_lock() {
            Some(slot) => slot,
            None => return false,
        };
        if slot.canceled {
            return false;
        }
        slot.value = Some(value);
        self.available.notify_one();
        true
    }

    /// Deposit a value, waiting for the slot lock
    ///
    /// Overwrites any unconsumed value. Returns false only when canceled.
    pub fn send(&self, value: T) -> bool {
        let mut slot = self.slot.lock();
        if slot.canceled {
            return false;
        }
        slot.value = Some(value);
        self.available.notify_one();
        true
    }

    /// Wait for a value and process it in place
    ///
    /// Blocks until a value is available, then runs `process` on it while
    /// still holding the slot lock, so concurrent `try_send` calls fail
    /// until the callback returns. Returns false when the handoff was
    /// canceled instead of delivering a value.
    pub fn recv_once<F>(&self, process: F) -> bool
    where
        F: FnOnce(T),
    {
        let mut slot = self.slot.lock();
        loop {
            if slot.canceled {
                return false;
            }
            if let Some(value) = slot.value.take() {
                process(value);
                return true;
            }
            self.available.wait(&mut slot);
        }
    }

    /// Take the pending value without blocking, if any
    pub fn try_recv(&self) -> Option<T> {
        let mut slot = self.slot.try_lock()?;
        slot.value.take()
    }

    /// Cancel the handoff, waking any parked receiver
    ///
    /// Pending and future sends are discarded. Idempotent.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        slot.canceled = true;
        slot.value = None;
        self.available.notify_all();
    }

    pub fn is_canceled(&self) -> bool {
        self.slot.lock().canceled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_send_overwrites_earlier() {
        let handoff = Handoff::new();
        assert!(handoff.try_send(1));
        assert!(handoff.try_send(2));
        assert_eq!(handoff.try_recv(), Some(2));
        assert_eq!(handoff.try_recv(), None);
    }

    #[test]
    fn recv_once_consumes_exactly_one() {
        let handoff = Handoff::new();
        handoff.send(7);
        let mut seen = None;
        assert!(handoff.recv_once(|v| seen = Some(v)));
        assert_eq!(seen, Some(7));
        assert_eq!(handoff.try_recv(), None);
    }

    #[test]
    fn cancel_rejects_sends_and_clears_pending() {
        let handoff = Handoff::new();
        handoff.send(1);
        handoff.cancel();
        assert!(handoff.is_canceled());
        assert_eq!(handoff.try_recv(), None);
        assert!(!handoff.try_send(2));
        assert!(!handoff.send(3));
        assert!(!handoff.recv_once(|_: i32| panic!("canceled handoff delivered")));
    }

    #[test]
    fn cancel_is_idempotent() {
        let handoff = Handoff::new();
        handoff.cancel();
        handoff.cancel();
        handoff.cancel();
        assert!(handoff.is_canceled());
        assert!(!handoff.try_send(1));
        assert!(!handoff.send(2));
        assert!(!handoff.recv_once(|_: i32| panic!("canceled handoff delivered")));
    }
}
