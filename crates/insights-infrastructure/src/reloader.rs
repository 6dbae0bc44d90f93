//! Page reload collaborator.

use std::sync::atomic::{AtomicUsize, Ordering};

use insights_core::reload::PageReloader;

/// Records reload requests instead of performing them.
///
/// The embedding shell decides what a "full page reload" means; this
/// implementation makes the request observable (and is what tests inject).
#[derive(Debug, Default)]
pub struct NoopReloader {
    requests: AtomicUsize,
}

impl NoopReloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reloads requested so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PageReloader for NoopReloader {
    fn reload(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("page reload requested");
    }
}
