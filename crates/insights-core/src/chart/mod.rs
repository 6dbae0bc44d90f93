//! Chart domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted chart document (`Chart`, `ChartType`)
//! - `config`: the open configuration record (`ChartConfig`)
//! - `store`: document-store contract (`ChartStore`)

mod config;
mod model;
mod store;

pub use config::{ChartConfig, FilterGroupConfig, Series, SortRule};
pub use model::{Chart, ChartType};
pub use store::ChartStore;
