//! Stateless per-factor scorers. Each returns a 0-100 score plus a short justification.
//!
//! Missing candidate or job data degrades the affected factor instead of failing the run.

pub(crate) mod behavioral;
pub(crate) mod competency;
pub(crate) mod education;
pub(crate) mod experience;
pub(crate) mod location;
pub(crate) mod salary;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, FactorKind, JobPosting};

pub use salary::{extract_salary_range, SalaryRange};

/// Discrete factor contribution, kept for explainable rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: FactorKind,
    pub score: u8,
    pub notes: String,
}

impl FactorScore {
    pub(crate) fn new(factor: FactorKind, score: u8, notes: impl Into<String>) -> Self {
        Self {
            factor,
            score,
            notes: notes.into(),
        }
    }
}

/// Run all six scorers in [`FactorKind::ALL`] order.
pub fn score_all(candidate: &Candidate, job: &JobPosting, as_of: NaiveDate) -> Vec<FactorScore> {
    vec![
        competency::score(candidate, job),
        experience::score(candidate, job, as_of),
        education::score(candidate, job),
        location::score(candidate, job),
        salary::score(candidate, job),
        behavioral::score(candidate, job),
    ]
}

/// Half-up rounding into the 0-100 band.
pub(crate) fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
