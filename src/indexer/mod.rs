//! Search index rebuild
//!
//! Copies every incident from the record store into the engine's index.
//! Document ids are assigned 1..=N in store order.

use crate::config::IndexerSettings;
use crate::engines::SearchBackend;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::info;

pub struct Reindexer<'a> {
    store: &'a dyn RecordStore,
    backend: &'a dyn SearchBackend,
    index: &'a str,
    settings: &'a IndexerSettings,
}

impl<'a> Reindexer<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        backend: &'a dyn SearchBackend,
        index: &'a str,
        settings: &'a IndexerSettings,
    ) -> Self {
        Self {
            store,
            backend,
            index,
            settings,
        }
    }

    /// Write every document; stops at the first failure
    pub async fn run(&self) -> Result<usize> {
        let documents = self
            .store
            .documents()
            .await
            .context("failed to load documents from the record store")?;
        let total = documents.len();
        info!("Reindexing {} documents into '{}'", total, self.index);

        let mut writes = stream::iter(documents.iter().enumerate())
            .map(|(i, doc)| async move {
                self.backend
                    .replace(self.index, i as u64 + 1, doc)
                    .await
                    .with_context(|| format!("failed to index '{}'", doc.incident_id))
            })
            .buffered(self.settings.concurrency.max(1));

        let mut written = 0;
        while let Some(result) = writes.next().await {
            result?;
            written += 1;
            if self.settings.progress_every > 0 && written % self.settings.progress_every == 0 {
                info!("{} / {}", written, total);
            }
        }

        info!("Reindexed {} documents", written);
        Ok(written)
    }
}
