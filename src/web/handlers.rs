//! HTTP request handlers

use super::state::AppState;
use crate::bench::{Benchmark, BenchmarkReport};
use crate::error::{BenchmarkError, EnrichmentError, PipelineError};
use crate::search::{EnrichedRecord, SearchOutcome};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tera::Context;
use thiserror::Error;
use tracing::{error, info};

/// Query parameters for the main endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Output format (`html` or `json`)
    pub format: Option<String>,
}

impl SearchParams {
    fn wants_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

/// Search results response for JSON format
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub number_of_results: usize,
    pub engine_ms: u128,
    pub elapsed_ms: u128,
    pub results: Vec<EnrichedRecord>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            number_of_results: outcome.records.len(),
            engine_ms: outcome.engine_duration.as_millis(),
            elapsed_ms: outcome.elapsed_ms(),
            query: outcome.query,
            results: outcome.records,
        }
    }
}

/// Handler failure; every variant becomes a generic 500
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Search(#[from] PipelineError),

    #[error("listing failed: {0}")]
    Listing(#[from] EnrichmentError),

    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),

    #[error("template error: {0}")]
    Template(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Benchmark(e) => error!("Benchmark aborted: {}", e),
            other => error!("Request failed: {}", other),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Main endpoint: listing, benchmark, or search depending on `q`
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = params.q.as_deref().unwrap_or("").trim();

    if query.is_empty() {
        listing(&state, &params).await
    } else if state.is_benchmark(query) {
        benchmark(&state, &params).await
    } else {
        search(&state, &params, query).await
    }
}

async fn listing(state: &AppState, params: &SearchParams) -> Result<Response, AppError> {
    let items = state
        .store
        .listing(state.settings.ui.listing_limit)
        .await?;

    if params.wants_json() {
        return Ok(Json(items).into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("items", &items);
    render(state, "index.html", &ctx)
}

async fn search(
    state: &AppState,
    params: &SearchParams,
    query: &str,
) -> Result<Response, AppError> {
    let outcome = state.pipeline.run(query).await?;
    info!(
        "Search '{}': {} results in {} ms",
        query,
        outcome.records.len(),
        outcome.elapsed_ms()
    );

    if params.wants_json() {
        return Ok(Json(SearchResponse::from(outcome)).into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("query", query);
    ctx.insert("elapsed_ms", &outcome.elapsed_ms());
    ctx.insert("results", &outcome.records);
    render(state, "results.html", &ctx)
}

async fn benchmark(state: &AppState, params: &SearchParams) -> Result<Response, AppError> {
    let settings = &state.settings.benchmark;
    info!(
        "Starting benchmark: {} terms x {} repetitions",
        settings.corpus.len(),
        settings.repetitions
    );

    let report: BenchmarkReport = Benchmark::new(&state.pipeline, settings.unit)
        .run(&settings.corpus, settings.repetitions)
        .await?;
    report.log();

    if params.wants_json() {
        return Ok(Json(report).into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("report", &report);
    render(state, "benchmark.html", &ctx)
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Result<Response, AppError> {
    let html = state.templates.render_with_context(template, ctx)?;
    Ok(Html(html).into_response())
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
