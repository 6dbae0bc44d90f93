//! Cookie store contract.
//!
//! The session layer bootstraps identity from a read-only key-value cookie
//! source. The transport that fills it (browser, test fixture) is out of
//! scope here.

/// Read-only key-value source for session bootstrap.
pub trait CookieStore: Send + Sync {
    /// Returns the cookie value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
}
