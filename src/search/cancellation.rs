use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared stop signal, checked by the searches once per queue pop.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag {
    is_cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        CancellationFlag {
            is_cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.is_cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(Ordering::Relaxed)
    }
}
