//! Query execution results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column descriptor in a result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
    #[serde(default)]
    pub data_type: String,
}

/// The materialized result of executing a data query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub columns: Vec<ResultColumn>,
    /// Rows as JSON objects keyed by column name
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(default)]
    pub total_row_count: u64,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
