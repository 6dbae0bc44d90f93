//! Tolerant JSON parsing.

use serde::de::DeserializeOwned;

use crate::notify::Notifier;

/// Parses `raw` as JSON, substituting `default` on failure.
///
/// Parse failures are logged and reported through the notifier; they never
/// propagate to the caller.
pub fn parse_json_or<T: DeserializeOwned>(raw: &str, default: T, notifier: &dyn Notifier) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("failed to parse JSON: {err}");
            notifier.error(&format!("Failed to parse JSON: {err}"));
            default
        }
    }
}
