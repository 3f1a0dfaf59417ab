//! Query dispatch: free text in, ranked identifiers out

use super::models::{Dispatched, RankedId};
use crate::config::EngineSettings;
use crate::engines::{EngineQuery, SearchBackend};
use crate::error::DispatchError;
use std::sync::Arc;
use tracing::debug;

/// Join whitespace-separated terms with the engine's OR operator.
///
/// A document matching any single term ranks, not only documents matching
/// the whole phrase. Short or approximate queries then still return
/// something, at the cost of precision.
pub fn build_disjunction(raw: &str) -> Option<String> {
    let terms: Vec<&str> = raw.split_whitespace().collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join("|"))
    }
}

/// Sends disjunctive queries to the engine with a bounded result window
pub struct Dispatcher {
    backend: Arc<dyn SearchBackend>,
    index: String,
    limit: u32,
    max_matches: u32,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn SearchBackend>, settings: &EngineSettings) -> Self {
        Self {
            backend,
            index: settings.index.clone(),
            limit: settings.limit,
            max_matches: settings.max_matches,
        }
    }

    /// Run `raw` against the engine.
    ///
    /// Identifiers come back in the engine's rank order together with the
    /// engine's own query time. Failures are returned as-is, never retried.
    pub async fn dispatch(&self, raw: &str) -> Result<Dispatched, DispatchError> {
        let query = build_disjunction(raw).ok_or(DispatchError::EmptyQuery)?;
        let request = EngineQuery {
            index: self.index.clone(),
            query,
            limit: self.limit,
            max_matches: self.max_matches,
        };

        let hits = self.backend.search(&request).await?;
        debug!(
            "{} ranked {} ids for '{}' in {:?}",
            self.backend.name(),
            hits.ids.len(),
            request.query,
            hits.took
        );

        Ok(Dispatched {
            ids: RankedId::from_ordered(hits.ids),
            engine_duration: hits.took,
        })
    }
}
