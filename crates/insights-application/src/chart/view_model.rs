//! Chart view-model: chart-to-query translation and execution gating.
//!
//! A `ChartViewModel` wraps exactly one chart document. On refresh it
//! rebuilds its owned data query from the document's declarative
//! configuration, decides whether re-execution is warranted by comparing
//! the staged operation sequence against the last executed one, and on
//! execution writes the finalized sequence back into the document.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use insights_core::chart::{Chart, ChartConfig, ChartType};
use insights_core::error::Result;
use insights_core::history::HistoryBuffer;
use insights_core::notify::Notifier;
use insights_core::query::{
    DataQuery, Dimension, FilterRule, Measure, Operation, OrderDirection, QueryCache, QueryEngine,
    QueryResult, ops_equal,
};

/// Reactive wrapper around one chart document.
///
/// Invariant: exactly one data query exists per view-model; rebuilding
/// discards and replaces its staged operations wholesale.
pub struct ChartViewModel {
    chart: RwLock<Chart>,
    data_query: DataQuery,
    query_cache: Arc<QueryCache>,
    engine: Arc<dyn QueryEngine>,
    notifier: Arc<dyn Notifier>,
    history: Mutex<HistoryBuffer<Chart>>,
    last_executed: RwLock<Vec<Operation>>,
}

impl ChartViewModel {
    /// Wraps a chart document.
    ///
    /// The persisted operation sequence seeds the last-executed record, so
    /// a refresh that stages the same sequence does not re-execute.
    pub fn new(
        chart: Chart,
        query_cache: Arc<QueryCache>,
        engine: Arc<dyn QueryEngine>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let last_executed = chart.operations.clone();
        let history = HistoryBuffer::new(chart.clone());
        Self {
            chart: RwLock::new(chart),
            data_query: DataQuery::new(),
            query_cache,
            engine,
            notifier,
            history: Mutex::new(history),
            last_executed: RwLock::new(last_executed),
        }
    }

    /// Snapshot of the wrapped document.
    pub async fn chart(&self) -> Chart {
        self.chart.read().await.clone()
    }

    /// The staged operations of the owned data query.
    pub async fn staged_operations(&self) -> Vec<Operation> {
        self.data_query.current_operations().await
    }

    /// The result of the most recent execution, if any.
    pub async fn result(&self) -> Option<QueryResult> {
        self.data_query.result().await
    }

    /// Returns the chart's share link, minting a token on first call.
    pub async fn ensure_share_link(&self) -> String {
        let (link, snapshot) = {
            let mut chart = self.chart.write().await;
            let link = chart.ensure_share_link().to_string();
            (link, chart.clone())
        };
        self.record(snapshot).await;
        link
    }

    /// Rebuilds the data query and executes it when warranted.
    ///
    /// 1. No-op unless the chart has both a source query and a chart type.
    /// 2. Defers until the base query's in-flight execution settles, so
    ///    operations are never staged against a query mid-flight.
    /// 3. Stages the operation sequence via [`Self::prepare_data_query`];
    ///    a translation failure toasts a reason and leaves the staged query
    ///    empty.
    /// 4. Executes only when the staged sequence differs from the last
    ///    executed one (serialized comparison), or when `force` is set.
    /// 5. On execution, records the executed sequence and writes it back to
    ///    the document when it differs from what is persisted there.
    ///
    /// Concurrent refreshes on the same view-model are not serialized; the
    /// last write to the staged operations wins.
    ///
    /// # Returns
    ///
    /// `true` when an execution actually ran.
    pub async fn refresh(&self, adhoc_filters: &[FilterRule], force: bool) -> Result<bool> {
        let (query_name, chart_type) = {
            let chart = self.chart.read().await;
            (chart.query.clone(), chart.chart_type)
        };
        let (Some(query_name), Some(_)) = (query_name, chart_type) else {
            return Ok(false);
        };

        let base_query = self.query_cache.get(&query_name).await;
        base_query.wait_until_idle().await;

        if !self.prepare_data_query(adhoc_filters).await {
            return Ok(false);
        }

        let staged = self.data_query.current_operations().await;
        {
            let last = self.last_executed.read().await;
            if !force && ops_equal(&staged, &last) {
                return Ok(false);
            }
        }

        self.data_query.execute(self.engine.as_ref()).await?;
        *self.last_executed.write().await = staged.clone();

        let mut chart = self.chart.write().await;
        if !ops_equal(&chart.operations, &staged) {
            chart.operations = staged;
            chart.touch();
            let snapshot = chart.clone();
            drop(chart);
            self.record(snapshot).await;
        }

        Ok(true)
    }

    /// Translates the chart's declarative configuration into a staged
    /// operation sequence.
    ///
    /// Idempotent: unchanged inputs stage a structurally equal sequence.
    /// Every failure path reports a reason through the notifier, resets the
    /// staged query to empty, and returns `false` without erroring.
    pub async fn prepare_data_query(&self, adhoc_filters: &[FilterRule]) -> bool {
        let chart = self.chart.read().await.clone();
        let (Some(query_name), Some(chart_type)) = (chart.query.clone(), chart.chart_type) else {
            return false;
        };

        self.data_query.reset().await;
        self.data_query.set_source(query_name).await;

        for filter in dedup_filters(adhoc_filters) {
            self.data_query
                .add_operation(Operation::Filter {
                    column: filter.column.clone(),
                    operator: filter.operator.clone(),
                    value: filter.value.clone(),
                })
                .await;
        }

        if let Some(group) = &chart.config.filters {
            if !group.filters.is_empty() {
                self.data_query
                    .add_operation(Operation::FilterGroup {
                        logical_operator: group.logical_operator,
                        filters: group.filters.clone(),
                    })
                    .await;
            }
        }

        let built = match chart_type {
            ChartType::Line | ChartType::Bar | ChartType::Area | ChartType::Scatter => {
                build_axis_query(&chart.config)
            }
            ChartType::Number => build_number_query(&chart.config),
            ChartType::Donut | ChartType::Funnel => build_donut_query(&chart.config),
            ChartType::Table => build_table_query(&chart.config),
        };

        let operations = match built {
            Ok(operations) => operations,
            Err(reason) => {
                tracing::warn!(chart = %chart.name, "query translation failed: {reason}");
                self.notifier.error(&reason);
                self.data_query.reset().await;
                return false;
            }
        };
        for operation in operations {
            self.data_query.add_operation(operation).await;
        }

        // Persisted sort order; rules missing a column or direction are skipped
        for rule in &chart.config.order_by {
            if let (Some(column), Some(direction)) = (&rule.column, rule.direction) {
                if !column.is_empty() {
                    self.data_query
                        .add_operation(Operation::OrderBy {
                            column: column.clone(),
                            direction,
                        })
                        .await;
                }
            }
        }
        self.data_query
            .add_operation(Operation::Limit {
                limit: chart.config.limit,
            })
            .await;

        true
    }

    /// Updates the granularity of every configuration field whose dimension
    /// name matches. All matches across different fields are updated.
    pub async fn update_granularity(&self, column_name: &str, granularity: &str) {
        let snapshot = {
            let mut chart = self.chart.write().await;
            if chart.config.update_granularity(column_name, granularity) > 0 {
                chart.touch();
            }
            chart.clone()
        };
        self.record(snapshot).await;
    }

    /// Changes the chart type, resetting the configuration only when the
    /// change crosses the axis/non-axis boundary. Switching among axis
    /// subtypes, or among non-axis types, keeps the configuration.
    pub async fn set_chart_type(&self, chart_type: ChartType) {
        let (reset, snapshot) = {
            let mut chart = self.chart.write().await;
            let previous = chart.chart_type.replace(chart_type);
            let reset =
                previous.is_some_and(|previous| previous.is_axis() != chart_type.is_axis());
            if reset {
                chart.config = ChartConfig::reset();
            }
            if previous != Some(chart_type) {
                chart.touch();
            }
            (reset, chart.clone())
        };
        if reset {
            self.data_query.reset().await;
        }
        self.record(snapshot).await;
    }

    /// Replaces the configuration with the empty shape (`order_by: []`,
    /// `limit: 100`) and clears the staged operations.
    pub async fn reset_config(&self) {
        let snapshot = {
            let mut chart = self.chart.write().await;
            chart.config = ChartConfig::reset();
            chart.touch();
            chart.clone()
        };
        self.data_query.reset().await;
        self.record(snapshot).await;
    }

    /// Inserts or replaces a calculated measure.
    pub async fn update_measure(&self, measure: Measure) {
        let snapshot = {
            let mut chart = self.chart.write().await;
            chart.update_measure(measure);
            chart.clone()
        };
        self.record(snapshot).await;
    }

    /// Removes a calculated measure by name.
    pub async fn remove_measure(&self, measure_name: &str) {
        let snapshot = {
            let mut chart = self.chart.write().await;
            chart.remove_measure(measure_name);
            chart.clone()
        };
        self.record(snapshot).await;
    }

    /// Restores the previous document snapshot.
    pub async fn undo(&self) -> bool {
        let restored = self.history.lock().await.undo();
        match restored {
            Some(snapshot) => {
                *self.chart.write().await = snapshot;
                true
            }
            None => false,
        }
    }

    /// Re-applies an undone document snapshot.
    pub async fn redo(&self) -> bool {
        let restored = self.history.lock().await.redo();
        match restored {
            Some(snapshot) => {
                *self.chart.write().await = snapshot;
                true
            }
            None => false,
        }
    }

    async fn record(&self, snapshot: Chart) {
        self.history.lock().await.record(snapshot);
    }
}

/// Deduplicates ad-hoc filters by structural equality, keeping first
/// occurrences in order.
fn dedup_filters(filters: &[FilterRule]) -> Vec<&FilterRule> {
    let mut seen: Vec<&FilterRule> = Vec::new();
    for filter in filters {
        if !seen.iter().any(|kept| *kept == filter) {
            seen.push(filter);
        }
    }
    seen
}

fn valid_dimension(dimension: &Option<Dimension>) -> Option<&Dimension> {
    dimension.as_ref().filter(|d| d.is_valid())
}

/// Axis charts: summarize against the x-axis, or pivot wider when a
/// split-by dimension is present.
fn build_axis_query(config: &ChartConfig) -> std::result::Result<Vec<Operation>, String> {
    let Some(x_axis) = valid_dimension(&config.x_axis) else {
        return Err("X-axis column is required".to_string());
    };
    let split_by = valid_dimension(&config.split_by);
    if let Some(split_by) = split_by {
        if split_by.column_name == x_axis.column_name {
            return Err("X-axis and Split By cannot be the same column".to_string());
        }
    }

    let mut measures: Vec<Measure> = config
        .y_axis
        .iter()
        .filter_map(|series| series.measure.clone())
        .filter(|measure| measure.is_valid())
        .collect();
    if measures.is_empty() {
        measures.push(Measure::count());
    }

    let operation = match split_by {
        Some(split_by) => Operation::PivotWider {
            rows: vec![x_axis.clone()],
            columns: vec![split_by.clone()],
            values: measures,
        },
        None => Operation::Summarize {
            measures,
            dimensions: vec![x_axis.clone()],
        },
    };
    Ok(vec![operation])
}

/// Number charts: summarize the measures, optionally grouped by date.
fn build_number_query(config: &ChartConfig) -> std::result::Result<Vec<Operation>, String> {
    let measures: Vec<Measure> = config
        .measures
        .iter()
        .filter(|measure| measure.is_valid())
        .cloned()
        .collect();
    if measures.is_empty() {
        return Err("At least one measure is required".to_string());
    }

    let dimensions = valid_dimension(&config.date_dimension)
        .map(|dimension| vec![dimension.clone()])
        .unwrap_or_default();
    Ok(vec![Operation::Summarize {
        measures,
        dimensions,
    }])
}

/// Donut and funnel charts: one label dimension, one value measure, sorted
/// descending by value.
fn build_donut_query(config: &ChartConfig) -> std::result::Result<Vec<Operation>, String> {
    let Some(label) = valid_dimension(&config.label_column) else {
        return Err("Label column is required".to_string());
    };
    let Some(value) = config.value_column.as_ref().filter(|m| m.is_valid()) else {
        return Err("Value column is required".to_string());
    };

    Ok(vec![
        Operation::Summarize {
            measures: vec![value.clone()],
            dimensions: vec![label.clone()],
        },
        Operation::OrderBy {
            column: value.measure_name.clone(),
            direction: OrderDirection::Desc,
        },
    ])
}

/// Table charts: summarize over the row dimensions, or pivot wider when
/// column dimensions are present. Values default to the row count.
fn build_table_query(config: &ChartConfig) -> std::result::Result<Vec<Operation>, String> {
    let rows: Vec<Dimension> = config
        .rows
        .iter()
        .filter(|dimension| dimension.is_valid())
        .cloned()
        .collect();
    if rows.is_empty() {
        return Err("At least one row is required".to_string());
    }

    let columns: Vec<Dimension> = config
        .columns
        .iter()
        .filter(|dimension| dimension.is_valid())
        .cloned()
        .collect();
    let mut values: Vec<Measure> = config
        .values
        .iter()
        .filter(|measure| measure.is_valid())
        .cloned()
        .collect();
    if values.is_empty() {
        values.push(Measure::count());
    }

    let operation = if columns.is_empty() {
        Operation::Summarize {
            measures: values,
            dimensions: rows,
        }
    } else {
        Operation::PivotWider {
            rows,
            columns,
            values,
        }
    };
    Ok(vec![operation])
}

#[cfg(test)]
#[path = "view_model_test.rs"]
mod tests;
