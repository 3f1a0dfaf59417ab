//! In-memory stand-ins for the search engine and the record store

#![allow(dead_code)]

use async_trait::async_trait;
use incident_search::engines::{EngineHits, EngineQuery, SearchBackend};
use incident_search::error::{DispatchError, EnrichmentError};
use incident_search::search::{IndexDocument, ListingItem, RankedId};
use incident_search::store::{RecordStore, StoreRow};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type RankFn = Box<dyn Fn(&str) -> Vec<String> + Send + Sync>;
type ReorderFn = Box<dyn Fn(Vec<StoreRow>) -> Vec<StoreRow> + Send + Sync>;

/// Engine that ranks ids with a closure over the disjunctive query
pub struct FakeEngine {
    rank: RankFn,
    took: Duration,
    fail_on: Option<String>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new(rank: impl Fn(&str) -> Vec<String> + Send + Sync + 'static) -> Self {
        Self {
            rank: Box::new(rank),
            took: Duration::from_millis(2),
            fail_on: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Engine that returns `ids` for every query
    pub fn fixed(ids: &[&str]) -> Self {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        Self::new(move |_| ids.clone())
    }

    /// Five ids derived from the query text
    pub fn echoing() -> Self {
        Self::new(|q| (0..5).map(|i| format!("{q}#{i}")).collect())
    }

    pub fn took(mut self, took: Duration) -> Self {
        self.took = took;
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.fail_on = Some(query.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &EngineQuery) -> Result<EngineHits, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.query.clone());
        tokio::task::yield_now().await;

        if self.fail_on.as_deref() == Some(query.query.as_str()) {
            return Err(DispatchError::Engine {
                status: 500,
                message: "index offline".to_string(),
            });
        }

        Ok(EngineHits {
            ids: (self.rank)(&query.query),
            took: self.took,
        })
    }

    async fn replace(&self, _: &str, _: u64, _: &IndexDocument) -> Result<(), DispatchError> {
        Ok(())
    }
}

/// Store that knows every id, derives fields from it, and returns rows in
/// whatever order `reorder` produces
pub struct FakeStore {
    reorder: ReorderFn,
    missing: HashSet<String>,
    listing: Vec<ListingItem>,
    decode_failure: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            reorder: Box::new(|rows| rows),
            missing: HashSet::new(),
            listing: Vec::new(),
            decode_failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reordering(
        mut self,
        reorder: impl Fn(Vec<StoreRow>) -> Vec<StoreRow> + Send + Sync + 'static,
    ) -> Self {
        self.reorder = Box::new(reorder);
        self
    }

    /// Rows come back reversed
    pub fn reversed() -> Self {
        Self::new().reordering(|mut rows| {
            rows.reverse();
            rows
        })
    }

    pub fn without(mut self, id: &str) -> Self {
        self.missing.insert(id.to_string());
        self
    }

    /// Every batch fails as if a row could not be decoded
    pub fn failing_decode(mut self, message: &str) -> Self {
        self.decode_failure = Some(message.to_string());
        self
    }

    pub fn with_listing(mut self, items: Vec<ListingItem>) -> Self {
        self.listing = items;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn row_for(rank: usize, id: &str) -> StoreRow {
    StoreRow {
        rank: rank as i64,
        incident_id: id.to_string(),
        display_name: format!("rule:{id}"),
        description: format!("fields:{id}"),
        host: Some(format!("host:{id}")),
        link: None,
        excerpt: format!("excerpt\n{id}"),
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn fetch_batch(&self, ids: &[RankedId]) -> Result<Vec<StoreRow>, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(message) = &self.decode_failure {
            return Err(EnrichmentError::Decode(message.clone()));
        }

        let rows = ids
            .iter()
            .filter(|r| !self.missing.contains(&r.id))
            .map(|r| row_for(r.rank, &r.id))
            .collect();
        Ok((self.reorder)(rows))
    }

    async fn listing(&self, limit: i64) -> Result<Vec<ListingItem>, EnrichmentError> {
        Ok(self
            .listing
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn documents(&self) -> Result<Vec<IndexDocument>, EnrichmentError> {
        Ok(Vec::new())
    }
}

/// Every permutation of `0..n`
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn build(current: &mut Vec<usize>, remaining: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if remaining.is_empty() {
            out.push(current.clone());
            return;
        }
        for i in 0..remaining.len() {
            let next = remaining.remove(i);
            current.push(next);
            build(current, remaining, out);
            current.pop();
            remaining.insert(i, next);
        }
    }

    let mut out = Vec::new();
    build(&mut Vec::new(), &mut (0..n).collect(), &mut out);
    out
}
