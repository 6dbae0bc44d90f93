//! Chart orchestration.
//!
//! - `view_model`: chart-to-query translation and execution gating
//! - `registry`: one cached view-model per chart identifier

mod registry;
mod view_model;

pub use registry::ChartRegistry;
pub use view_model::ChartViewModel;
