//! Thread coordination primitives.

pub mod handoff;

pub use handoff::Handoff;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared shutdown flag, cloneable across threads
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown; idempotent
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let copy = token.clone();
        assert!(!copy.is_canceled());
        token.cancel();
        assert!(copy.is_canceled());
        // idempotent
        copy.cancel();
        assert!(token.is_canceled());
    }
}
