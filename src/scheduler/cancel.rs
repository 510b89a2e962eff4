use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag for abandoning a request that is still running.
///
/// Clones observe the same flag. Bands check it before every row, so a
/// cancelled request stops within one row per worker.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
