use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// A cooperative stop signal shared between a running bot and its controller.
///
/// Clones share the same flag. Once stopped, a handle stays stopped.
///
/// # Examples
///
/// ```
/// use sweepwise_bot::StopHandle;
///
/// let handle = StopHandle::new();
/// let remote = handle.clone();
/// std::thread::spawn(move || remote.stop()).join().unwrap();
/// assert!(handle.is_stopped());
/// ```
#[derive(Debug, Default, Clone)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Creates a handle that has not been stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests every holder of this handle to stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Returns `true` once [`StopHandle::stop`] has been called on any clone.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
