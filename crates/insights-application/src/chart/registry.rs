//! Chart view-model registry.
//!
//! One view-model per chart identifier, cached for the lifetime of the
//! registry (no eviction). The registry is an explicit injected-scope
//! object rather than process-wide state, so tests construct isolated
//! instances.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use insights_core::chart::ChartStore;
use insights_core::error::Result;
use insights_core::notify::Notifier;
use insights_core::query::{QueryCache, QueryEngine};

use super::view_model::ChartViewModel;

/// Cache of chart view-models keyed by chart identifier.
pub struct ChartRegistry {
    charts: RwLock<HashMap<String, Arc<ChartViewModel>>>,
    store: Arc<dyn ChartStore>,
    query_cache: Arc<QueryCache>,
    engine: Arc<dyn QueryEngine>,
    notifier: Arc<dyn Notifier>,
}

impl ChartRegistry {
    /// Creates an empty registry with injected collaborators.
    pub fn new(
        store: Arc<dyn ChartStore>,
        query_cache: Arc<QueryCache>,
        engine: Arc<dyn QueryEngine>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            charts: RwLock::new(HashMap::new()),
            store,
            query_cache,
            engine,
            notifier,
        }
    }

    /// Returns the view-model for `name`, constructing and registering one
    /// from the stored document on first access.
    ///
    /// At most one live instance exists per identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the chart document cannot be loaded.
    pub async fn get(&self, name: &str) -> Result<Arc<ChartViewModel>> {
        {
            let charts = self.charts.read().await;
            if let Some(view_model) = charts.get(name) {
                return Ok(view_model.clone());
            }
        }

        let chart = self.store.load(name).await?;

        let mut charts = self.charts.write().await;
        // Another caller may have registered it while we were loading
        if let Some(view_model) = charts.get(name) {
            return Ok(view_model.clone());
        }
        let view_model = Arc::new(ChartViewModel::new(
            chart,
            self.query_cache.clone(),
            self.engine.clone(),
            self.notifier.clone(),
        ));
        charts.insert(name.to_string(), view_model.clone());
        Ok(view_model)
    }

    /// Number of cached view-models.
    pub async fn len(&self) -> usize {
        self.charts.read().await.len()
    }

    /// Whether the registry holds no view-models yet.
    pub async fn is_empty(&self) -> bool {
        self.charts.read().await.is_empty()
    }
}
