//! Page reload contract.
//!
//! Login and logout end with a full state reset rather than a partial
//! update. The reset is modeled as a collaborator so it is observable in
//! tests instead of being a process-level action.

/// Collaborator that performs the full-page reload after login/logout.
pub trait PageReloader: Send + Sync {
    fn reload(&self);
}
