//! Repeatable latency benchmark over a fixed query corpus

use super::stats::{LatencyStats, TimeUnit};
use crate::error::BenchmarkError;
use crate::search::SearchPipeline;
use serde::Serialize;
use tracing::info;

/// Outcome of a complete benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Pipeline runs performed
    pub executions: usize,
    /// Runs dropped for rounding to zero at the chosen unit
    pub discarded: usize,
    pub stats: LatencyStats,
}

impl BenchmarkReport {
    /// Write the summary to the log
    pub fn log(&self) {
        let s = &self.stats;
        info!("Median ({}): {} {}", s.count, s.median, s.unit);
        info!("Avg ({})   : {} {}", s.count, s.mean, s.unit);
        info!("Min ({})   : {} {}", s.count, s.min, s.unit);
        info!("Max ({})   : {} {}", s.count, s.max, s.unit);
        if self.discarded > 0 {
            info!(
                "{} of {} executions fell below 1 {} and were discarded",
                self.discarded, self.executions, s.unit
            );
        }
    }
}

/// Drives the full search pipeline over a corpus and summarises latency
pub struct Benchmark<'a> {
    pipeline: &'a SearchPipeline,
    unit: TimeUnit,
}

impl<'a> Benchmark<'a> {
    pub fn new(pipeline: &'a SearchPipeline, unit: TimeUnit) -> Self {
        Self { pipeline, unit }
    }

    /// Run every corpus term once per repetition.
    ///
    /// Any pipeline failure aborts the run. Finishing with no sample above
    /// zero is a fatal [`BenchmarkError::EmptySampleSet`], never a zeroed
    /// report.
    pub async fn run(
        &self,
        corpus: &[String],
        repetitions: usize,
    ) -> Result<BenchmarkReport, BenchmarkError> {
        if corpus.is_empty() || repetitions == 0 {
            return Err(BenchmarkError::InvalidRun);
        }

        let mut samples = Vec::with_capacity(corpus.len() * repetitions);
        let mut executions = 0;

        for round in 1..=repetitions {
            info!("Benchmark round {} / {}", round, repetitions);
            for term in corpus {
                let outcome =
                    self.pipeline
                        .run(term)
                        .await
                        .map_err(|source| BenchmarkError::Pipeline {
                            term: term.clone(),
                            source,
                        })?;
                executions += 1;

                if let Some(sample) = self.unit.sample(outcome.elapsed) {
                    samples.push(sample);
                }
            }
        }

        let stats = LatencyStats::from_samples(&samples, self.unit)
            .ok_or(BenchmarkError::EmptySampleSet { executions })?;

        Ok(BenchmarkReport {
            executions,
            discarded: executions - samples.len(),
            stats,
        })
    }
}
