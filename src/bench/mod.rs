//! Latency benchmark module
//!
//! Measures end-to-end search latency (engine time plus enrichment time)
//! over a fixed corpus and reports median, mean, min and max.

mod harness;
mod stats;

pub use harness::{Benchmark, BenchmarkReport};
pub use stats::{max, mean, median, min, LatencyStats, TimeUnit};
