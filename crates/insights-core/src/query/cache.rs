//! Shared base-query cache.
//!
//! Base queries (the named source queries charts read from) are shared
//! between view-models, so in-flight executions are visible to every chart
//! bound to the same source. The cache is an injected object, never a
//! process-wide global.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::data_query::DataQuery;

/// Registry of shared base queries keyed by query name.
pub struct QueryCache {
    queries: RwLock<HashMap<String, Arc<DataQuery>>>,
}

impl QueryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            queries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached base query for `name`, constructing one bound to
    /// that source on first access.
    pub async fn get(&self, name: &str) -> Arc<DataQuery> {
        {
            let queries = self.queries.read().await;
            if let Some(query) = queries.get(name) {
                return query.clone();
            }
        }

        let mut queries = self.queries.write().await;
        // Double-check after re-acquiring the lock
        if let Some(query) = queries.get(name) {
            return query.clone();
        }
        let query = Arc::new(DataQuery::for_source(name));
        queries.insert(name.to_string(), query.clone());
        query
    }

    /// Number of cached base queries.
    pub async fn len(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.queries.read().await.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
