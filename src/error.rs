//! Error taxonomy for the search pipeline
//!
//! Every failure is surfaced to the caller as-is: there is no retry, no
//! partial result and no silent fallback anywhere in the pipeline.

use thiserror::Error;

/// Failure while turning a query into ranked identifiers
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("query contains no search terms")]
    EmptyQuery,

    #[error("search engine unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("search engine returned status {status}: {message}")]
    Engine { status: u16, message: String },

    #[error("malformed search engine response: {0}")]
    MalformedResponse(String),
}

/// Failure while hydrating ranked identifiers from the relational store
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("record store unreachable: {0}")]
    Unreachable(String),

    #[error("failed to decode store row: {0}")]
    Decode(String),

    #[error("record store query failed: {0}")]
    Query(String),

    #[error("no record for '{id}' at rank {rank}")]
    MissingRecord { id: String, rank: usize },

    #[error("store returned rank {rank} outside of the requested {len} identifiers")]
    RankOutOfRange { rank: i64, len: usize },

    #[error("store returned rank {rank} more than once")]
    DuplicateRank { rank: usize },

    #[error("store returned '{found}' at rank {rank}, expected '{expected}'")]
    IdentifierMismatch {
        rank: usize,
        expected: String,
        found: String,
    },
}

/// SQLSTATE classes for connection exceptions (08) and invalid
/// authorization (28)
fn is_connection_state(code: &str) -> bool {
    code.starts_with("08") || code.starts_with("28")
}

impl From<sqlx::Error> for EnrichmentError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db)
                if db.code().is_some_and(|code| is_connection_state(&code)) =>
            {
                Self::Unreachable(err.to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => Self::Unreachable(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => Self::Decode(err.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

/// Failure of one full dispatch + enrichment run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("query dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("enrichment failed: {0}")]
    Enrichment(#[from] EnrichmentError),
}

/// Fatal benchmark failure; the whole run is aborted
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("no latency samples survived filtering after {executions} executions")]
    EmptySampleSet { executions: usize },

    #[error("benchmark needs at least one repetition and one corpus term")]
    InvalidRun,

    #[error("pipeline failed for benchmark term '{term}': {source}")]
    Pipeline {
        term: String,
        #[source]
        source: PipelineError,
    },
}
