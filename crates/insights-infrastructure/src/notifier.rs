//! Tracing-backed notifier.

use insights_core::notify::Notifier;

/// Routes toast messages into the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "insights::toast", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "insights::toast", "{message}");
    }
}
