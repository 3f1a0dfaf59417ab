//! Concurrent searches over one shared engine handle and store pool

mod common;

use common::{FakeEngine, FakeStore};
use futures::future::join_all;
use incident_search::config::EngineSettings;
use incident_search::search::SearchPipeline;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_queries_get_only_their_own_results() {
    let engine = Arc::new(FakeEngine::echoing());
    let store = Arc::new(FakeStore::reversed());
    let pipeline = Arc::new(SearchPipeline::new(
        engine.clone(),
        store.clone(),
        &EngineSettings::default(),
    ));

    let tasks: Vec<_> = (0..64)
        .map(|n| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let query = format!("term{n} other{n}");
                let outcome = pipeline.run(&query).await;
                (n, outcome)
            })
        })
        .collect();

    for joined in join_all(tasks).await {
        let (n, outcome) = joined.expect("search task panicked");
        let outcome = outcome.expect("search failed");

        let expected: Vec<String> = (0..5).map(|i| format!("term{n}|other{n}#{i}")).collect();
        let ids: Vec<String> = outcome
            .records
            .iter()
            .map(|r| r.incident_id.clone())
            .collect();

        assert_eq!(ids, expected, "request {n} received foreign results");
        assert_eq!(outcome.query, format!("term{n} other{n}"));
    }

    assert_eq!(engine.calls(), 64);
    assert_eq!(store.calls(), 64);
}
