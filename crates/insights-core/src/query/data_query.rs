//! Staged data query.
//!
//! A `DataQuery` holds the operation sequence a view-model is about to
//! execute, plus an executing flag other tasks can await. Each view-model
//! owns exactly one; base queries are shared through the [`QueryCache`].
//!
//! [`QueryCache`]: super::cache::QueryCache

use tokio::sync::{RwLock, watch};

use super::engine::QueryEngine;
use super::operation::Operation;
use super::result::QueryResult;
use crate::error::Result;

#[derive(Debug, Default)]
struct QueryState {
    operations: Vec<Operation>,
    result: Option<QueryResult>,
}

/// A query whose operations are staged before execution.
///
/// Rebuilding always replaces the staged operations wholesale; there is no
/// in-place editing of individual operations.
pub struct DataQuery {
    state: RwLock<QueryState>,
    executing: watch::Sender<bool>,
}

impl DataQuery {
    /// Creates an empty query with no staged operations.
    pub fn new() -> Self {
        let (executing, _) = watch::channel(false);
        Self {
            state: RwLock::new(QueryState::default()),
            executing,
        }
    }

    /// Creates a query already bound to a named source.
    pub fn for_source(query: impl Into<String>) -> Self {
        let (executing, _) = watch::channel(false);
        Self {
            state: RwLock::new(QueryState {
                operations: vec![Operation::Source {
                    query: query.into(),
                }],
                result: None,
            }),
            executing,
        }
    }

    /// Clears all staged operations and any previous result.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.operations.clear();
        state.result = None;
    }

    /// Appends a source binding.
    pub async fn set_source(&self, query: impl Into<String>) {
        let mut state = self.state.write().await;
        state.operations.push(Operation::Source {
            query: query.into(),
        });
    }

    /// Appends a single operation.
    pub async fn add_operation(&self, operation: Operation) {
        let mut state = self.state.write().await;
        state.operations.push(operation);
    }

    /// Replaces the staged operations wholesale.
    pub async fn set_operations(&self, operations: Vec<Operation>) {
        let mut state = self.state.write().await;
        state.operations = operations;
    }

    /// Snapshot of the currently staged operations.
    pub async fn current_operations(&self) -> Vec<Operation> {
        self.state.read().await.operations.clone()
    }

    /// Snapshot of the last execution result, if any.
    pub async fn result(&self) -> Option<QueryResult> {
        self.state.read().await.result.clone()
    }

    /// Whether an execution is currently in flight.
    pub fn is_executing(&self) -> bool {
        *self.executing.borrow()
    }

    /// Waits until no execution is in flight.
    ///
    /// The wait is unbounded, matching the cooperative "defer until the base
    /// query settles" contract; callers that need a deadline can race this
    /// against a timer.
    pub async fn wait_until_idle(&self) {
        let mut rx = self.executing.subscribe();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Executes the staged operations through `engine`.
    ///
    /// The executing flag is raised for the duration of the call and lowered
    /// on both success and failure. The result is recorded on success.
    pub async fn execute(&self, engine: &dyn QueryEngine) -> Result<QueryResult> {
        let operations = self.current_operations().await;
        self.executing.send_replace(true);
        let outcome = engine.execute(&operations).await;
        self.executing.send_replace(false);

        let result = outcome?;
        self.state.write().await.result = Some(result.clone());
        Ok(result)
    }
}

impl Default for DataQuery {
    fn default() -> Self {
        Self::new()
    }
}
