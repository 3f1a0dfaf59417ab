//! Search pipeline data models

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Document identifier tagged with its 0-based position in the engine's ranking
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankedId {
    pub id: String,
    pub rank: usize,
}

impl RankedId {
    pub fn new(id: impl Into<String>, rank: usize) -> Self {
        Self {
            id: id.into(),
            rank,
        }
    }

    /// Tag an engine-ordered identifier list with ranks
    pub fn from_ordered<I, S>(ids: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter()
            .enumerate()
            .map(|(rank, id)| Self::new(id, rank))
            .collect()
    }
}

/// An incident joined with its descriptive attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    pub incident_id: String,
    /// Display name of the rule that raised the incident
    pub display_name: String,
    /// Free-text fields
    pub description: String,
    /// Source host, if any
    pub host: Option<String>,
    /// Source link, if any
    pub link: Option<String>,
    /// Raw excerpt; rendered to HTML by the templates
    pub excerpt: String,
}

/// Output of the dispatcher
#[derive(Debug, Clone)]
pub struct Dispatched {
    /// Identifiers in the engine's native rank order
    pub ids: Vec<RankedId>,
    /// Engine self-reported query time
    pub engine_duration: Duration,
}

/// Output of the enricher
#[derive(Debug, Clone)]
pub struct Enriched {
    /// Records index-aligned with the ranked identifiers
    pub records: Vec<EnrichedRecord>,
    /// Engine time plus time spent enriching
    pub elapsed: Duration,
}

/// Row of the listing page shown for an empty query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingItem {
    pub incident_id: String,
    pub rule_id: String,
    pub target: String,
}

/// Document copied from the store into the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct IndexDocument {
    pub incident_id: String,
    pub fields: String,
}
