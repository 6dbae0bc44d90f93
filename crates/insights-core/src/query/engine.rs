//! Query engine contract.
//!
//! The engine owns operation semantics and execution; this layer only stages
//! operation sequences and hands them over.

use async_trait::async_trait;

use super::operation::Operation;
use super::result::QueryResult;
use crate::error::Result;

/// External collaborator that executes a staged operation sequence.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Executes `operations` and returns the materialized result.
    async fn execute(&self, operations: &[Operation]) -> Result<QueryResult>;
}
