//! Chart configuration.
//!
//! The persisted configuration is schemaless in the document store: one open
//! record whose fields are read selectively depending on the chart type.
//! Axis charts use `x_axis`/`split_by`/`y_axis`, number charts use
//! `measures`/`date_dimension`, donut and funnel charts use
//! `label_column`/`value_column`, and table charts use
//! `rows`/`columns`/`values`.

use serde::{Deserialize, Serialize};

use crate::query::{Dimension, FilterRule, LogicalOperator, Measure, OrderDirection};

/// One axis-chart series: a dimension/measure pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub dimension: Option<Dimension>,
    #[serde(default)]
    pub measure: Option<Measure>,
}

/// A persisted sort rule. Entries with a missing column or direction are
/// skipped at translation time rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortRule {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub direction: Option<OrderDirection>,
}

/// The chart document's persisted filter group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroupConfig {
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub filters: Vec<FilterRule>,
}

fn default_limit() -> u32 {
    100
}

/// Open configuration record covering every chart-type variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    // Axis charts
    #[serde(default)]
    pub x_axis: Option<Dimension>,
    #[serde(default)]
    pub split_by: Option<Dimension>,
    #[serde(default)]
    pub y_axis: Vec<Series>,

    // Number charts
    #[serde(default)]
    pub measures: Vec<Measure>,
    #[serde(default)]
    pub date_dimension: Option<Dimension>,

    // Donut and funnel charts
    #[serde(default)]
    pub label_column: Option<Dimension>,
    #[serde(default)]
    pub value_column: Option<Measure>,

    // Table charts
    #[serde(default)]
    pub rows: Vec<Dimension>,
    #[serde(default)]
    pub columns: Vec<Dimension>,
    #[serde(default)]
    pub values: Vec<Measure>,

    // Shared
    #[serde(default)]
    pub filters: Option<FilterGroupConfig>,
    #[serde(default)]
    pub order_by: Vec<SortRule>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_axis: None,
            split_by: None,
            y_axis: Vec::new(),
            measures: Vec::new(),
            date_dimension: None,
            label_column: None,
            value_column: None,
            rows: Vec::new(),
            columns: Vec::new(),
            values: Vec::new(),
            filters: None,
            order_by: Vec::new(),
            limit: default_limit(),
        }
    }
}

impl ChartConfig {
    /// The empty shape a config is reset to: no fields, `order_by: []`,
    /// `limit: 100`.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Updates the granularity of every dimension field whose column name
    /// matches, across both single-object and list-valued fields.
    ///
    /// # Returns
    ///
    /// The number of dimensions updated.
    pub fn update_granularity(&mut self, column_name: &str, granularity: &str) -> usize {
        let mut updated = 0;

        let mut apply = |dimension: &mut Dimension| {
            if dimension.column_name == column_name {
                dimension.granularity = Some(granularity.to_string());
                updated += 1;
            }
        };

        for dimension in [
            self.x_axis.as_mut(),
            self.split_by.as_mut(),
            self.date_dimension.as_mut(),
            self.label_column.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            apply(dimension);
        }
        for series in &mut self.y_axis {
            if let Some(dimension) = series.dimension.as_mut() {
                apply(dimension);
            }
        }
        for dimension in self.rows.iter_mut().chain(self.columns.iter_mut()) {
            apply(dimension);
        }

        updated
    }
}
