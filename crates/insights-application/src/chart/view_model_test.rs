use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use insights_core::chart::{Chart, ChartType, Series, SortRule};
use insights_core::error::Result;
use insights_core::notify::Notifier;
use insights_core::query::{
    Dimension, FilterRule, Measure, Operation, OrderDirection, QueryCache, QueryEngine,
    QueryResult, ops_equal,
};

use super::ChartViewModel;

#[derive(Default)]
struct RecordingEngine {
    executions: AtomicUsize,
}

#[async_trait]
impl QueryEngine for RecordingEngine {
    async fn execute(&self, _operations: &[Operation]) -> Result<QueryResult> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(QueryResult::empty())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

fn view_model(chart: Chart) -> (Arc<RecordingEngine>, Arc<RecordingNotifier>, ChartViewModel) {
    let engine = Arc::new(RecordingEngine::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let vm = ChartViewModel::new(
        chart,
        Arc::new(QueryCache::new()),
        engine.clone(),
        notifier.clone(),
    );
    (engine, notifier, vm)
}

fn bar_chart() -> Chart {
    let mut chart = Chart::new("chart-1");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Bar);
    chart.config.x_axis = Some(Dimension::new("region"));
    chart.config.y_axis = vec![Series {
        dimension: None,
        measure: Some(Measure::new("total", "amount", "sum")),
    }];
    chart
}

fn table_chart() -> Chart {
    let mut chart = Chart::new("chart-2");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Table);
    chart.config.rows = vec![Dimension::new("city")];
    chart
}

#[tokio::test]
async fn test_refresh_noop_without_source_or_type() {
    let mut chart = bar_chart();
    chart.query = None;
    let (engine, _, vm) = view_model(chart);
    assert!(!vm.refresh(&[], true).await.unwrap());

    let mut chart = bar_chart();
    chart.chart_type = None;
    let (_, _, vm) = view_model(chart);
    assert!(!vm.refresh(&[], true).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prepare_is_idempotent() {
    let (_, _, vm) = view_model(bar_chart());
    assert!(vm.prepare_data_query(&[]).await);
    let first = vm.staged_operations().await;
    assert!(vm.prepare_data_query(&[]).await);
    let second = vm.staged_operations().await;
    assert!(ops_equal(&first, &second));
}

#[tokio::test]
async fn test_axis_query_shape() {
    let (_, _, vm) = view_model(bar_chart());
    assert!(vm.prepare_data_query(&[]).await);
    let staged = vm.staged_operations().await;

    assert!(matches!(&staged[0], Operation::Source { query } if query == "orders"));
    assert!(matches!(
        &staged[1],
        Operation::Summarize { measures, dimensions }
            if measures.len() == 1 && dimensions[0].column_name == "region"
    ));
    assert!(matches!(&staged[2], Operation::Limit { limit: 100 }));
}

#[tokio::test]
async fn test_axis_split_by_builds_pivot_wider() {
    let mut chart = bar_chart();
    chart.config.split_by = Some(Dimension::new("category"));
    let (_, _, vm) = view_model(chart);
    assert!(vm.prepare_data_query(&[]).await);

    let staged = vm.staged_operations().await;
    assert!(matches!(
        &staged[1],
        Operation::PivotWider { rows, columns, .. }
            if rows[0].column_name == "region" && columns[0].column_name == "category"
    ));
}

#[tokio::test]
async fn test_axis_duplicate_split_by_fails_validation() {
    let mut chart = bar_chart();
    chart.config.split_by = Some(Dimension::new("region"));
    let (_, notifier, vm) = view_model(chart);

    assert!(!vm.prepare_data_query(&[]).await);
    assert!(vm.staged_operations().await.is_empty());
    let errors = notifier.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Split By"));
}

#[tokio::test]
async fn test_axis_measures_default_to_count() {
    let mut chart = bar_chart();
    chart.config.y_axis.clear();
    let (_, _, vm) = view_model(chart);
    assert!(vm.prepare_data_query(&[]).await);

    let staged = vm.staged_operations().await;
    assert!(matches!(
        &staged[1],
        Operation::Summarize { measures, .. } if measures == &vec![Measure::count()]
    ));
}

#[tokio::test]
async fn test_number_requires_a_named_measure() {
    let mut chart = Chart::new("chart-3");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Number);
    chart.config.measures = vec![Measure::new("", "amount", "sum")];
    let (_, notifier, vm) = view_model(chart);

    assert!(!vm.prepare_data_query(&[]).await);
    assert!(vm.staged_operations().await.is_empty());
    assert!(!notifier.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_number_groups_by_optional_date_dimension() {
    let mut chart = Chart::new("chart-3");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Number);
    chart.config.measures = vec![Measure::new("total", "amount", "sum")];
    chart.config.date_dimension = Some(Dimension::new("order_date"));
    let (_, _, vm) = view_model(chart);

    assert!(vm.prepare_data_query(&[]).await);
    let staged = vm.staged_operations().await;
    assert!(matches!(
        &staged[1],
        Operation::Summarize { dimensions, .. } if dimensions[0].column_name == "order_date"
    ));
}

#[tokio::test]
async fn test_donut_appends_descending_order_by() {
    let mut chart = Chart::new("chart-4");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Donut);
    chart.config.label_column = Some(Dimension::new("category"));
    chart.config.value_column = Some(Measure::new("total", "amount", "sum"));
    let (_, _, vm) = view_model(chart);

    assert!(vm.prepare_data_query(&[]).await);
    let staged = vm.staged_operations().await;
    assert!(matches!(&staged[1], Operation::Summarize { .. }));
    assert!(matches!(
        &staged[2],
        Operation::OrderBy { column, direction: OrderDirection::Desc } if column == "total"
    ));
}

#[tokio::test]
async fn test_donut_requires_label_and_value() {
    let mut chart = Chart::new("chart-4");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Funnel);
    chart.config.label_column = Some(Dimension::new("category"));
    let (_, notifier, vm) = view_model(chart);

    assert!(!vm.prepare_data_query(&[]).await);
    assert!(vm.staged_operations().await.is_empty());
    assert!(!notifier.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_table_defaults_values_to_count() {
    let (_, _, vm) = view_model(table_chart());
    assert!(vm.prepare_data_query(&[]).await);

    let staged = vm.staged_operations().await;
    assert!(matches!(
        &staged[1],
        Operation::Summarize { measures, dimensions }
            if measures == &vec![Measure::count()] && dimensions[0].column_name == "city"
    ));
}

#[tokio::test]
async fn test_table_with_columns_builds_pivot_wider() {
    let mut chart = table_chart();
    chart.config.columns = vec![Dimension::new("year")];
    let (_, _, vm) = view_model(chart);
    assert!(vm.prepare_data_query(&[]).await);

    let staged = vm.staged_operations().await;
    assert!(matches!(
        &staged[1],
        Operation::PivotWider { columns, .. } if columns[0].column_name == "year"
    ));
}

#[tokio::test]
async fn test_table_requires_a_row_dimension() {
    let mut chart = table_chart();
    chart.config.rows.clear();
    let (_, notifier, vm) = view_model(chart);

    assert!(!vm.prepare_data_query(&[]).await);
    assert!(vm.staged_operations().await.is_empty());
    assert!(!notifier.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_adhoc_filters_are_deduplicated() {
    let filter = FilterRule {
        column: "status".to_string(),
        operator: "=".to_string(),
        value: json!("Open"),
    };
    let (_, _, vm) = view_model(bar_chart());
    assert!(
        vm.prepare_data_query(&[filter.clone(), filter.clone()])
            .await
    );

    let filters = vm
        .staged_operations()
        .await
        .into_iter()
        .filter(|op| matches!(op, Operation::Filter { .. }))
        .count();
    assert_eq!(filters, 1);
}

#[tokio::test]
async fn test_sort_rules_missing_column_or_direction_are_skipped() {
    let mut chart = bar_chart();
    chart.config.order_by = vec![
        SortRule {
            column: Some("total".to_string()),
            direction: Some(OrderDirection::Asc),
        },
        SortRule {
            column: None,
            direction: Some(OrderDirection::Desc),
        },
        SortRule {
            column: Some("region".to_string()),
            direction: None,
        },
    ];
    let (_, _, vm) = view_model(chart);
    assert!(vm.prepare_data_query(&[]).await);

    let order_bys = vm
        .staged_operations()
        .await
        .into_iter()
        .filter(|op| matches!(op, Operation::OrderBy { .. }))
        .count();
    assert_eq!(order_bys, 1);
}

#[tokio::test]
async fn test_refresh_skips_execution_for_unchanged_operations() {
    let (engine, _, vm) = view_model(bar_chart());

    assert!(vm.refresh(&[], false).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 1);

    // Same staged sequence: no re-execution
    assert!(!vm.refresh(&[], false).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 1);

    // Forced: executes even when unchanged
    assert!(vm.refresh(&[], true).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_refresh_executes_when_operations_differ() {
    let (engine, _, vm) = view_model(bar_chart());
    assert!(vm.refresh(&[], false).await.unwrap());

    vm.update_granularity("region", "Month").await;
    assert!(vm.refresh(&[], false).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_refresh_writes_executed_operations_back() {
    let (_, _, vm) = view_model(bar_chart());
    assert!(vm.chart().await.operations.is_empty());

    vm.refresh(&[], false).await.unwrap();
    let chart = vm.chart().await;
    assert!(!chart.operations.is_empty());
    assert!(ops_equal(&chart.operations, &vm.staged_operations().await));
}

#[tokio::test]
async fn test_persisted_operations_suppress_initial_execution() {
    let (_, _, vm) = view_model(bar_chart());
    vm.refresh(&[], false).await.unwrap();
    let executed = vm.chart().await;

    // A fresh view-model over the same document stages the same sequence
    let (engine, _, vm) = view_model(executed);
    assert!(!vm.refresh(&[], false).await.unwrap());
    assert_eq!(engine.executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reset_config_yields_empty_shape() {
    let (_, _, vm) = view_model(bar_chart());
    assert!(vm.prepare_data_query(&[]).await);
    vm.reset_config().await;

    let chart = vm.chart().await;
    assert!(chart.config.order_by.is_empty());
    assert_eq!(chart.config.limit, 100);
    assert!(chart.config.x_axis.is_none());
    assert!(vm.staged_operations().await.is_empty());
}

#[tokio::test]
async fn test_crossing_axis_boundary_resets_config() {
    let (_, _, vm) = view_model(table_chart());
    vm.set_chart_type(ChartType::Line).await;

    let chart = vm.chart().await;
    assert_eq!(chart.chart_type, Some(ChartType::Line));
    assert!(chart.config.rows.is_empty(), "table config was reset");
}

#[tokio::test]
async fn test_switching_among_axis_types_keeps_config() {
    let mut chart = bar_chart();
    chart.chart_type = Some(ChartType::Line);
    let (_, _, vm) = view_model(chart);
    vm.set_chart_type(ChartType::Bar).await;

    let chart = vm.chart().await;
    assert_eq!(chart.chart_type, Some(ChartType::Bar));
    assert!(chart.config.x_axis.is_some(), "axis config survives");
}

#[tokio::test]
async fn test_switching_among_non_axis_types_keeps_config() {
    let mut chart = Chart::new("chart-4");
    chart.query = Some("orders".to_string());
    chart.chart_type = Some(ChartType::Donut);
    chart.config.label_column = Some(Dimension::new("category"));
    chart.config.value_column = Some(Measure::new("total", "amount", "sum"));
    let (_, _, vm) = view_model(chart);
    vm.set_chart_type(ChartType::Funnel).await;

    let chart = vm.chart().await;
    assert_eq!(chart.chart_type, Some(ChartType::Funnel));
    assert!(chart.config.label_column.is_some(), "donut config survives");
    assert!(chart.config.value_column.is_some());
}

#[tokio::test]
async fn test_refresh_populates_result() {
    let (_, _, vm) = view_model(bar_chart());
    assert!(vm.result().await.is_none());

    assert!(vm.refresh(&[], false).await.unwrap());
    assert!(vm.result().await.is_some());
}

#[tokio::test]
async fn test_share_link_is_stable_across_calls() {
    let (_, _, vm) = view_model(bar_chart());
    let link = vm.ensure_share_link().await;
    assert!(link.starts_with("/shared/chart/"));
    assert_eq!(vm.ensure_share_link().await, link);
    assert_eq!(vm.chart().await.share_link.as_deref(), Some(link.as_str()));
}

#[tokio::test]
async fn test_update_measure_and_undo() {
    let (_, _, vm) = view_model(bar_chart());
    vm.update_measure(Measure::new("profit", "profit", "sum"))
        .await;
    assert!(
        vm.chart()
            .await
            .calculated_measures
            .as_ref()
            .unwrap()
            .contains_key("profit")
    );

    assert!(vm.undo().await);
    let measures = vm.chart().await.calculated_measures;
    assert!(measures.is_none() || measures.unwrap().is_empty());

    assert!(vm.redo().await);
    assert!(
        vm.chart()
            .await
            .calculated_measures
            .as_ref()
            .unwrap()
            .contains_key("profit")
    );
}
