//! Application layer for the Insights client state.
//!
//! Orchestrates the domain models from `insights-core`: the session
//! manager (identity lifecycle) and the chart view-model registry
//! (chart-to-query translation, execution gating, undo/redo). Reactive
//! "watch on change" triggers from the original UI map to explicit method
//! calls here: the owner invokes `refresh`/`set_chart_type` when
//! configuration changes.

pub mod chart;
pub mod session;

pub use chart::{ChartRegistry, ChartViewModel};
pub use session::SessionManager;
