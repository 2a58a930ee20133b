use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable out-of-band interrupt for a [`SceneComposer`](crate::SceneComposer).
///
/// Any clone may request a stop from any thread; the composer notices it at the
/// next step boundary, closes itself and reports
/// [`StepOutcome::Interrupted`](crate::StepOutcome::Interrupted).
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = StopHandle::new();
        let b = a.clone();
        assert!(!b.is_requested());
        a.request_stop();
        assert!(b.is_requested());
    }

    #[test]
    fn request_from_another_thread() {
        let handle = StopHandle::new();
        let remote = handle.clone();
        std::thread::spawn(move || remote.request_stop())
            .join()
            .unwrap();
        assert!(handle.is_requested());
    }
}
