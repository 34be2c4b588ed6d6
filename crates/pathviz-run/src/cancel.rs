use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation for a run, backed by an [`AtomicBool`].
///
/// Clones share the flag, so an animation driver can hold one and stop the
/// run without access to the controller. The controller checks the flag
/// before every expansion.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Clear a pending request. Every clone sees the cleared flag.
    #[inline]
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let held = token.clone();
        assert!(!token.is_cancelled());
        held.cancel();
        assert!(token.is_cancelled());
        token.reset();
        assert!(!held.is_cancelled());
        held.cancel();
        assert!(token.is_cancelled());
        assert!(!CancelToken::default().is_cancelled());
    }
}
