//! Latency sample statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Resolution latency samples are truncated to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "us")]
    Microseconds,
}

impl TimeUnit {
    /// Whole units in `elapsed`; the remainder is dropped
    pub fn truncate(self, elapsed: Duration) -> u128 {
        match self {
            TimeUnit::Milliseconds => elapsed.as_millis(),
            TimeUnit::Microseconds => elapsed.as_micros(),
        }
    }

    /// Turn an elapsed time into a sample, or `None` if it rounds to zero
    pub fn sample(self, elapsed: Duration) -> Option<f64> {
        match self.truncate(elapsed) {
            0 => None,
            n => Some(n as f64),
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Middle value of the sorted samples; mean of the two middle values for
/// an even count.
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

pub fn min(samples: &[f64]) -> Option<f64> {
    samples.iter().copied().reduce(f64::min)
}

pub fn max(samples: &[f64]) -> Option<f64> {
    samples.iter().copied().reduce(f64::max)
}

/// Summary of a non-empty sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyStats {
    pub count: usize,
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub unit: TimeUnit,
}

impl LatencyStats {
    /// Summarise `samples`; `None` when there is nothing to summarise
    pub fn from_samples(samples: &[f64], unit: TimeUnit) -> Option<Self> {
        Some(Self {
            count: samples.len(),
            median: median(samples)?,
            mean: mean(samples)?,
            min: min(samples)?,
            max: max(samples)?,
            unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[4.0, 8.0]), Some(6.0));
        assert_eq!(median(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_min_max() {
        let samples = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(min(&samples), Some(1.0));
        assert_eq!(max(&samples), Some(5.0));
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn test_stats_from_samples() {
        let stats = LatencyStats::from_samples(&[3.0, 1.0, 4.0, 1.0, 5.0], TimeUnit::Milliseconds)
            .unwrap();

        assert_eq!(stats.count, 5);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 2.8);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_stats_refuse_empty_set() {
        assert!(LatencyStats::from_samples(&[], TimeUnit::Milliseconds).is_none());
    }

    #[test]
    fn test_sub_resolution_samples_are_dropped() {
        let unit = TimeUnit::Milliseconds;
        assert_eq!(unit.sample(Duration::from_micros(999)), None);
        assert_eq!(unit.sample(Duration::from_micros(1999)), Some(1.0));
        assert_eq!(TimeUnit::Microseconds.sample(Duration::from_micros(999)), Some(999.0));
        assert_eq!(TimeUnit::Microseconds.sample(Duration::from_nanos(900)), None);
    }
}
