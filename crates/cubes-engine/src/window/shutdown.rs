use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable request to stop the render loop.
///
/// The runtime polls it between event batches and exits the event loop once
/// it is set. Safe to trigger from any thread.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = ShutdownHandle::new();
        let b = a.clone();
        assert!(!b.is_requested());
        a.request();
        assert!(b.is_requested());
    }

    #[test]
    fn request_from_another_thread() {
        let handle = ShutdownHandle::new();
        let remote = handle.clone();
        std::thread::spawn(move || remote.request())
            .join()
            .expect("thread panicked");
        assert!(handle.is_requested());
    }
}
