//! Settings structures for incident-search configuration

use crate::bench::TimeUnit;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub database: DatabaseSettings,
    pub benchmark: BenchmarkSettings,
    pub indexer: IndexerSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (INCIDENT_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("INCIDENT_SEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("INCIDENT_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("INCIDENT_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("INCIDENT_SEARCH_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("INCIDENT_SEARCH_ENGINE_URL") {
            self.engine.url = val;
        }
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = Url::parse(&self.engine.url) {
            bail!("engine.url '{}' is not a valid URL: {}", self.engine.url, e);
        }
        if self.engine.index.trim().is_empty() {
            bail!("engine.index must not be empty");
        }
        if self.engine.limit == 0 {
            bail!("engine.limit must be greater than zero");
        }
        if self.engine.max_matches < self.engine.limit {
            bail!(
                "engine.max_matches ({}) must be at least engine.limit ({})",
                self.engine.max_matches,
                self.engine.limit
            );
        }
        if !(self.engine.request_timeout.is_finite() && self.engine.request_timeout > 0.0) {
            bail!(
                "engine.request_timeout must be a positive number of seconds, got {}",
                self.engine.request_timeout
            );
        }
        if self.benchmark.repetitions == 0 {
            bail!("benchmark.repetitions must be greater than zero");
        }
        if self.benchmark.corpus.is_empty() {
            bail!("benchmark.corpus must contain at least one term");
        }
        if self.benchmark.sentinel.trim().is_empty() {
            bail!("benchmark.sentinel must not be empty");
        }
        if self.indexer.concurrency == 0 {
            bail!("indexer.concurrency must be greater than zero");
        }
        if self.ui.listing_limit <= 0 {
            bail!("ui.listing_limit must be greater than zero");
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Incident Search".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 4242,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Search engine (Manticore HTTP JSON API) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Base URL of the engine's HTTP listener
    pub url: String,
    /// Full-text index to query
    pub index: String,
    /// Stored attribute holding the document identifier
    pub id_field: String,
    /// Maximum number of matches returned per query
    pub limit: u32,
    /// Maximum number of candidate matches the engine keeps while ranking
    pub max_matches: u32,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9308".to_string(),
            index: "incidents".to_string(),
            id_field: "incident_id".to_string(),
            limit: 100,
            max_matches: 50_000,
            request_timeout: 5.0,
            pool_maxsize: 20,
        }
    }
}

/// Relational store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgresql://postgres@127.0.0.1:5432/nextdb?sslmode=disable".to_string(),
            max_connections: 10,
            acquire_timeout: 5,
        }
    }
}

/// Latency benchmark settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSettings {
    /// Query value that triggers the benchmark instead of a search
    pub sentinel: String,
    /// Number of passes over the corpus
    pub repetitions: usize,
    /// Resolution samples are truncated to
    pub unit: TimeUnit,
    /// Queries issued on every pass
    pub corpus: Vec<String>,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            sentinel: "calculate".to_string(),
            repetitions: 10,
            unit: TimeUnit::default(),
            corpus: default_corpus(),
        }
    }
}

/// Reindex command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerSettings {
    /// Documents written to the engine concurrently
    pub concurrency: usize,
    /// Log progress every N documents
    pub progress_every: usize,
}

impl Default for IndexerSettings {
    fn default() -> Self {
        Self {
            concurrency: 8,
            progress_every: 1000,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Rows shown on the listing page
    pub listing_limit: i64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { listing_limit: 50 }
    }
}

fn default_corpus() -> Vec<String> {
    [
        "layer", "opposite", "waist", "become", "address", "adult", "upper", "twelve", "card",
        "prefer", "patient", "concerning", "welcome", "bread", "connect", "beyond", "law",
        "northern", "more", "gray", "west", "except", "OK", "negative", "nation", "program",
        "plenty", "wine", "information", "produce", "animal", "smart", "fear", "lock", "upper",
        "physical", "beautiful", "truck", "steady", "card", "walk", "rock", "bear", "grass",
        "hand", "odd", "proof", "decrease", "represent", "over", "quiet", "solve", "require",
        "important", "inform", "nose", "very", "crowd", "third", "request", "woman", "practical",
        "invite", "adjective", "wake", "soon", "itself", "relation", "fork", "food", "average",
        "change", "well", "each", "quality", "supply", "point", "dollar", "child", "pound",
        "balance", "suddenly", "cook", "notice", "traffic", "recognize", "drunk", "toilet",
        "always", "say", "reason", "under", "forget", "replace", "medical", "clothes", "breast",
        "straight", "duck", "admit",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}
