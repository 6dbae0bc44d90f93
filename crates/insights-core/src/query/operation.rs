//! Declarative query operations.
//!
//! A chart's data query is an ordered list of these operations, staged by
//! the view-model and handed to the query engine for execution. The list is
//! always rebuilt wholesale; operations are never edited in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column used for grouping, splitting, or pivot axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Date truncation unit ("Day", "Month", "Year", ...) for date columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

impl Dimension {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: None,
            granularity: None,
        }
    }

    /// True when the dimension has a usable column name.
    pub fn is_valid(&self) -> bool {
        !self.column_name.is_empty()
    }
}

/// An aggregated value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Display name of the measure, also its identity key
    pub measure_name: String,
    pub column_name: String,
    /// Aggregation function ("sum", "avg", "count", ...)
    pub aggregation: String,
}

impl Measure {
    pub fn new(
        measure_name: impl Into<String>,
        column_name: impl Into<String>,
        aggregation: impl Into<String>,
    ) -> Self {
        Self {
            measure_name: measure_name.into(),
            column_name: column_name.into(),
            aggregation: aggregation.into(),
        }
    }

    /// The row-count aggregate used whenever a chart specifies no measures.
    pub fn count() -> Self {
        Self::new("count", "count", "count")
    }

    /// True when the measure has a usable name.
    pub fn is_valid(&self) -> bool {
        !self.measure_name.is_empty()
    }
}

/// Sort direction for order-by operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// How filter rules inside a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    And,
    Or,
}

/// A single filter rule inside a filter group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub column: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

/// One step of a data query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Binds the query to its named source query
    Source { query: String },
    /// Ad-hoc filter supplied by the caller at refresh time
    Filter {
        column: String,
        operator: String,
        #[serde(default)]
        value: Value,
    },
    /// The chart document's persisted filter group
    FilterGroup {
        logical_operator: LogicalOperator,
        filters: Vec<FilterRule>,
    },
    /// Aggregation of measures over grouping dimensions
    Summarize {
        measures: Vec<Measure>,
        dimensions: Vec<Dimension>,
    },
    /// Reshapes rows into columns keyed by the splitting dimensions
    PivotWider {
        rows: Vec<Dimension>,
        columns: Vec<Dimension>,
        values: Vec<Measure>,
    },
    OrderBy {
        column: String,
        direction: OrderDirection,
    },
    Limit { limit: u32 },
}

/// Structural equality of two operation sequences via serialized comparison.
///
/// This is the gate used to decide whether a refresh warrants re-execution.
pub fn ops_equal(a: &[Operation], b: &[Operation]) -> bool {
    let left = serde_json::to_value(a).unwrap_or(Value::Null);
    let right = serde_json::to_value(b).unwrap_or(Value::Null);
    left == right
}
