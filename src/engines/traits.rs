//! Engine traits and types

use crate::error::DispatchError;
use crate::search::IndexDocument;
use async_trait::async_trait;
use std::time::Duration;

/// Full-text query as sent to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineQuery {
    /// Target index
    pub index: String,
    /// Query in the engine's extended syntax
    pub query: String,
    /// Maximum number of matches returned
    pub limit: u32,
    /// Maximum number of candidate matches kept while ranking
    pub max_matches: u32,
}

/// Ranked matches returned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineHits {
    /// Document identifiers, best match first
    pub ids: Vec<String>,
    /// Query execution time reported by the engine itself
    pub took: Duration,
}

/// A full-text search engine used as a ranked-identifier source
///
/// Implementations are shared by every in-flight request, so they must be
/// safe to call concurrently without external locking.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Engine name, used in logs
    fn name(&self) -> &str;

    /// Run a ranked query and return identifiers in rank order
    async fn search(&self, query: &EngineQuery) -> Result<EngineHits, DispatchError>;

    /// Insert or overwrite one document in `index`
    async fn replace(
        &self,
        index: &str,
        doc_id: u64,
        doc: &IndexDocument,
    ) -> Result<(), DispatchError>;
}
