//! Query domain module.
//!
//! # Module Structure
//!
//! - `operation`: declarative query operations (`Operation` and friends)
//! - `data_query`: the staged-operation holder (`DataQuery`)
//! - `engine`: execution contract (`QueryEngine`)
//! - `result`: materialized results (`QueryResult`)
//! - `cache`: shared base-query registry (`QueryCache`)

mod cache;
mod data_query;
mod engine;
mod operation;
mod result;

pub use cache::QueryCache;
pub use data_query::DataQuery;
pub use engine::QueryEngine;
pub use operation::{
    Dimension, FilterRule, LogicalOperator, Measure, Operation, OrderDirection, ops_equal,
};
pub use result::{QueryResult, ResultColumn};
