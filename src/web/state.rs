//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::SearchBackend;
use crate::search::SearchPipeline;
use crate::store::RecordStore;
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup; every request gets a cheap clone of the handles.
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search pipeline (engine + store)
    pub pipeline: Arc<SearchPipeline>,
    /// Record store, used directly by the listing page
    pub store: Arc<dyn RecordStore>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        backend: Arc<dyn SearchBackend>,
        store: Arc<dyn RecordStore>,
    ) -> anyhow::Result<Self> {
        let pipeline = Arc::new(SearchPipeline::new(
            backend,
            store.clone(),
            &settings.engine,
        ));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            pipeline,
            store,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Whether `query` asks for the benchmark instead of a search
    pub fn is_benchmark(&self, query: &str) -> bool {
        query == self.settings.benchmark.sentinel
    }
}
