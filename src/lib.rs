//! Incident search: full-text ranking, rank-preserving enrichment, and
//! latency measurement
//!
//! Free-text queries go to an external full-text engine (Manticore), whose
//! ranked identifiers are re-hydrated from PostgreSQL in the exact order the
//! engine produced them. A benchmark harness drives the same pipeline over a
//! fixed corpus and reports latency statistics.

pub mod bench;
pub mod config;
pub mod engines;
pub mod error;
pub mod indexer;
pub mod network;
pub mod search;
pub mod store;
pub mod web;

pub use config::Settings;
pub use engines::SearchBackend;
pub use error::{BenchmarkError, DispatchError, EnrichmentError, PipelineError};
pub use search::{SearchOutcome, SearchPipeline};
pub use store::RecordStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
