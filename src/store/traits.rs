//! Record store traits and types

use crate::error::EnrichmentError;
use crate::search::{EnrichedRecord, IndexDocument, ListingItem, RankedId};
use async_trait::async_trait;

/// One row of a batch lookup, tagged with the rank it was requested at
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreRow {
    pub rank: i64,
    pub incident_id: String,
    pub display_name: String,
    pub description: String,
    pub host: Option<String>,
    pub link: Option<String>,
    pub excerpt: String,
}

impl StoreRow {
    pub fn into_record(self) -> EnrichedRecord {
        EnrichedRecord {
            incident_id: self.incident_id,
            display_name: self.display_name,
            description: self.description,
            host: self.host,
            link: self.link,
            excerpt: self.excerpt,
        }
    }
}

/// Relational store holding the descriptive side of every incident
///
/// Row order of `fetch_batch` is unspecified; callers restore rank order
/// from each row's `rank` tag.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up every identifier in one round trip
    async fn fetch_batch(&self, ids: &[RankedId]) -> Result<Vec<StoreRow>, EnrichmentError>;

    /// Most recent incidents for the listing page
    async fn listing(&self, limit: i64) -> Result<Vec<ListingItem>, EnrichmentError>;

    /// Every document that belongs in the search index
    async fn documents(&self) -> Result<Vec<IndexDocument>, EnrichmentError>;
}
