//! Dispatch + enrichment as one latency-measured unit

use super::dispatcher::Dispatcher;
use super::enricher::Enricher;
use super::models::EnrichedRecord;
use crate::config::EngineSettings;
use crate::engines::SearchBackend;
use crate::error::PipelineError;
use crate::store::RecordStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Result of one search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    /// Records in the engine's rank order
    pub records: Vec<EnrichedRecord>,
    /// Engine self-reported query time
    pub engine_duration: Duration,
    /// Engine time plus enrichment time
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Search executor shared by every request
pub struct SearchPipeline {
    dispatcher: Dispatcher,
    enricher: Enricher,
}

impl SearchPipeline {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        store: Arc<dyn RecordStore>,
        settings: &EngineSettings,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(backend, settings),
            enricher: Enricher::new(store),
        }
    }

    /// Dispatch `query` and enrich the ranked identifiers
    pub async fn run(&self, query: &str) -> Result<SearchOutcome, PipelineError> {
        let dispatched = self.dispatcher.dispatch(query).await?;
        let enriched = self
            .enricher
            .enrich(&dispatched.ids, dispatched.engine_duration)
            .await?;

        debug!(
            "Search '{}' returned {} records in {:?} (engine {:?})",
            query,
            enriched.records.len(),
            enriched.elapsed,
            dispatched.engine_duration
        );

        Ok(SearchOutcome {
            query: query.to_string(),
            records: enriched.records,
            engine_duration: dispatched.engine_duration,
            elapsed: enriched.elapsed,
        })
    }
}
