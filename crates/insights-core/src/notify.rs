//! Toast/notification contract.
//!
//! Validation failures and user-visible outcomes are reported through this
//! fire-and-forget collaborator; the rendering side is out of scope.

/// Fire-and-forget user-visible messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that drops every message. Useful as a default and in tests that
/// do not assert on toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
