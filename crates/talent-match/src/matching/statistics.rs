use serde::{Deserialize, Serialize};

use super::engine::MatchResult;

/// Inclusive score ranges reported in the histogram, highest band first.
const BUCKETS: [(&str, u8, u8); 5] = [
    ("90-100", 90, 100),
    ("80-89", 80, 89),
    ("70-79", 70, 79),
    ("60-69", 60, 69),
    ("0-59", 0, 59),
];

/// One histogram band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub min: u8,
    pub max: u8,
    pub count: usize,
}

/// Score distribution for a job's whole active pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total: usize,
    pub at_least_70: usize,
    pub at_least_80: usize,
    pub at_least_90: usize,
    pub max_score: u8,
    pub mean_score: u8,
    pub histogram: Vec<HistogramBucket>,
}

impl MatchStatistics {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let scores: Vec<u8> = results.iter().map(|result| result.score).collect();
        let at_least = |threshold: u8| scores.iter().filter(|score| **score >= threshold).count();

        let total = scores.len();
        let max_score = scores.iter().copied().max().unwrap_or(0);
        let mean_score = if total == 0 {
            0
        } else {
            let sum: u64 = scores.iter().map(|score| u64::from(*score)).sum();
            (sum as f64 / total as f64).round() as u8
        };

        let histogram = BUCKETS
            .iter()
            .map(|(label, min, max)| HistogramBucket {
                label: label.to_string(),
                min: *min,
                max: *max,
                count: scores
                    .iter()
                    .filter(|score| (*min..=*max).contains(*score))
                    .count(),
            })
            .collect();

        Self {
            total,
            at_least_70: at_least(70),
            at_least_80: at_least(80),
            at_least_90: at_least(90),
            max_score,
            mean_score,
            histogram,
        }
    }
}
