//! PostgreSQL record store

use super::traits::*;
use crate::config::DatabaseSettings;
use crate::error::EnrichmentError;
use crate::search::{IndexDocument, ListingItem, RankedId};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

/// Batch lookup keyed by (rank, incident_id) pairs bound as two arrays.
const FETCH_BATCH: &str = r#"
SELECT t.rank,
       i.incident_id,
       r.display_name,
       COALESCE(i.fields, '') AS description,
       h.display_name AS host,
       l.display_name AS link,
       COALESCE(i.snippet, '') AS excerpt
FROM unnest($1::bigint[], $2::text[]) AS t(rank, incident_id)
JOIN incidents i ON i.incident_id = t.incident_id
JOIN rules r ON r.rule_id = i.rule_id
LEFT JOIN hosts h ON h.host_id = i.host_id
LEFT JOIN links l ON l.link_id = i.link_id
"#;

const LISTING: &str = r#"
SELECT i.incident_id, i.rule_id, COALESCE(i.target, '') AS target
FROM incidents i
ORDER BY i.created_at DESC
LIMIT $1
"#;

const DOCUMENTS: &str = r#"
SELECT i.incident_id, COALESCE(i.fields, '') AS fields
FROM incidents i
ORDER BY i.incident_id
"#;

/// Record store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Build the pool; connections are opened lazily on first use
    pub fn connect_lazy(settings: &DatabaseSettings) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
            .connect_lazy(&settings.url)?;
        Ok(Self { pool })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_batch(&self, ids: &[RankedId]) -> Result<Vec<StoreRow>, EnrichmentError> {
        let ranks: Vec<i64> = ids.iter().map(|r| r.rank as i64).collect();
        let keys: Vec<String> = ids.iter().map(|r| r.id.clone()).collect();

        let rows = sqlx::query_as::<_, StoreRow>(FETCH_BATCH)
            .bind(ranks)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} rows for {} identifiers", rows.len(), ids.len());
        Ok(rows)
    }

    async fn listing(&self, limit: i64) -> Result<Vec<ListingItem>, EnrichmentError> {
        let rows = sqlx::query_as::<_, ListingItem>(LISTING)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn documents(&self) -> Result<Vec<IndexDocument>, EnrichmentError> {
        let rows = sqlx::query_as::<_, IndexDocument>(DOCUMENTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
