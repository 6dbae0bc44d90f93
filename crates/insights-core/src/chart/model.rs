//! Chart document domain model.
//!
//! The chart document is the persisted declarative description of a chart:
//! its type, its configuration, its source binding, and the operation
//! sequence that produced its current results. It is owned by an external
//! document store; this layer mutates it in place and leaves durability to
//! the owner.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::ChartConfig;
use crate::query::{Measure, Operation};

/// The fixed set of chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Scatter,
    Number,
    Donut,
    Funnel,
    Table,
}

impl ChartType {
    /// True for chart types drawn against an x/y axis pair.
    ///
    /// Switching between two axis types keeps the configuration; crossing
    /// the axis/non-axis boundary resets it.
    pub fn is_axis(&self) -> bool {
        matches!(self, Self::Line | Self::Bar | Self::Area | Self::Scatter)
    }
}

/// Persisted declarative description of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Document identifier
    pub name: String,
    /// Name of the source query this chart reads from
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub config: ChartConfig,
    /// Computed measure definitions keyed by measure name; created lazily
    #[serde(default)]
    pub calculated_measures: Option<HashMap<String, Measure>>,
    /// The operation sequence that produced the chart's current results
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub share_link: Option<String>,
    #[serde(default)]
    pub is_live_connection: bool,
    /// When this layer last mutated the document
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Chart {
    /// Creates an empty chart document with the given identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: None,
            chart_type: None,
            config: ChartConfig::default(),
            calculated_measures: None,
            operations: Vec::new(),
            share_link: None,
            is_live_connection: false,
            modified_at: None,
        }
    }

    /// Inserts or replaces a calculated measure, creating the map lazily.
    pub fn update_measure(&mut self, measure: Measure) {
        self.calculated_measures
            .get_or_insert_with(HashMap::new)
            .insert(measure.measure_name.clone(), measure);
        self.touch();
    }

    /// Removes a calculated measure by name.
    pub fn remove_measure(&mut self, measure_name: &str) {
        if let Some(measures) = self.calculated_measures.as_mut() {
            if measures.remove(measure_name).is_some() {
                self.touch();
            }
        }
    }

    /// Returns the share link, minting a token on first use.
    pub fn ensure_share_link(&mut self) -> &str {
        if self.share_link.is_none() {
            self.share_link = Some(format!("/shared/chart/{}", Uuid::new_v4()));
            self.touch();
        }
        self.share_link.as_deref().unwrap_or_default()
    }

    /// Stamps the document as modified now.
    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}
