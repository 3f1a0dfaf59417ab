//! Rank-preserving enrichment
//!
//! Hydrates engine-ranked identifiers from the record store in one batch and
//! puts every row back at the rank it was requested at. The store's row
//! order is never trusted.

use super::models::{Enriched, EnrichedRecord, RankedId};
use crate::error::EnrichmentError;
use crate::store::{RecordStore, StoreRow};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct Enricher {
    store: Arc<dyn RecordStore>,
}

impl Enricher {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Enrich `ids`, returning records index-aligned with them.
    ///
    /// `elapsed` is `engine_duration` plus the time spent here. Empty input
    /// returns immediately without touching the store.
    pub async fn enrich(
        &self,
        ids: &[RankedId],
        engine_duration: Duration,
    ) -> Result<Enriched, EnrichmentError> {
        if ids.is_empty() {
            return Ok(Enriched {
                records: Vec::new(),
                elapsed: engine_duration,
            });
        }

        let start = Instant::now();
        let rows = self.store.fetch_batch(ids).await?;
        let records = restore_rank_order(ids, rows)?;

        Ok(Enriched {
            records,
            elapsed: start.elapsed() + engine_duration,
        })
    }
}

/// Place each row at the position of the identifier carrying its rank tag.
///
/// Fails on a rank that was never requested, a rank returned twice, a row
/// whose identifier disagrees with the one requested at that rank, and on
/// any identifier left without a row.
pub fn restore_rank_order(
    ids: &[RankedId],
    rows: Vec<StoreRow>,
) -> Result<Vec<EnrichedRecord>, EnrichmentError> {
    let positions: HashMap<usize, usize> = ids
        .iter()
        .enumerate()
        .map(|(pos, ranked)| (ranked.rank, pos))
        .collect();

    let mut slots: Vec<Option<EnrichedRecord>> = vec![None; ids.len()];

    for row in rows {
        let pos = usize::try_from(row.rank)
            .ok()
            .and_then(|rank| positions.get(&rank).copied())
            .ok_or(EnrichmentError::RankOutOfRange {
                rank: row.rank,
                len: ids.len(),
            })?;

        let expected = &ids[pos];
        if row.incident_id != expected.id {
            return Err(EnrichmentError::IdentifierMismatch {
                rank: expected.rank,
                expected: expected.id.clone(),
                found: row.incident_id,
            });
        }

        let slot = &mut slots[pos];
        if slot.is_some() {
            return Err(EnrichmentError::DuplicateRank {
                rank: expected.rank,
            });
        }
        *slot = Some(row.into_record());
    }

    slots
        .into_iter()
        .zip(ids)
        .map(|(slot, ranked)| {
            slot.ok_or_else(|| EnrichmentError::MissingRecord {
                id: ranked.id.clone(),
                rank: ranked.rank,
            })
        })
        .collect()
}
