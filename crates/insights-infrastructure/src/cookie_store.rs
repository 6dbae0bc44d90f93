//! Static cookie store.

use std::collections::HashMap;

use insights_core::session::CookieStore;

/// A fixed key-value cookie source, parseable from a `Cookie:` header.
#[derive(Debug, Clone, Default)]
pub struct StaticCookieStore {
    values: HashMap<String, String>,
}

impl StaticCookieStore {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Parses a `Cookie:` header value (`k1=v1; k2=v2`). Malformed pairs
    /// are skipped.
    pub fn from_header(header: &str) -> Self {
        let values = header
            .split(';')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { values }
    }
}

impl CookieStore for StaticCookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
