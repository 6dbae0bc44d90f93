//! Chart document store contract.
//!
//! Chart documents are owned and persisted by an external document store;
//! the state layer only loads them into view-models and mutates them in
//! place. There is no explicit save call; durability is the store's
//! concern.

use async_trait::async_trait;

use super::model::Chart;
use crate::error::Result;

/// Read access to persisted chart documents.
#[async_trait]
pub trait ChartStore: Send + Sync {
    /// Loads the chart document with the given identifier.
    async fn load(&self, name: &str) -> Result<Chart>;
}
