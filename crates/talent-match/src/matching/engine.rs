use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{Candidate, CandidateId, FactorKind, JobId, JobPosting};
use super::factors::{self, FactorScore};
use super::repository::{DataSourceError, MatchDataSource};
use super::statistics::MatchStatistics;
use super::weights::{MatchWeights, DEFAULT_WEIGHTS};

/// Threshold applied when callers do not pick one.
pub const DEFAULT_MIN_SCORE: u8 = 70;

/// Ranked compatibility of one candidate against one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub score: u8,
    pub components: Vec<FactorScore>,
}

impl MatchResult {
    pub fn factor_score(&self, factor: FactorKind) -> Option<u8> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.score)
    }
}

/// Error raised by the match orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// Orchestrates a scoring run: load the job and pool once, then score purely in memory.
pub struct MatchEngine<S> {
    source: Arc<S>,
    reference_date: Option<NaiveDate>,
}

impl<S> MatchEngine<S>
where
    S: MatchDataSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            reference_date: None,
        }
    }

    /// Pin the date used to close ongoing experience entries.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Score the active pool against a job, keep candidates at or above `min_score`, and rank
    /// them by descending composite score. Ties keep pool order.
    pub fn compute_matches(
        &self,
        job_id: &JobId,
        min_score: u8,
        weights: &MatchWeights,
    ) -> Result<Vec<MatchResult>, MatchingError> {
        let (job, pool) = self.load(job_id)?;
        let pool_size = pool.len();
        let as_of = self.reference_date();

        let mut results: Vec<MatchResult> = pool
            .iter()
            .map(|candidate| score_candidate(candidate, &job, weights, as_of))
            .filter(|result| result.score >= min_score)
            .collect();
        results.sort_by(|left, right| right.score.cmp(&left.score));

        info!(
            job_id = %job.id,
            pool = pool_size,
            matched = results.len(),
            min_score,
            "computed candidate matches"
        );
        Ok(results)
    }

    /// Aggregate the full scored pool under the default weights.
    pub fn compute_statistics(&self, job_id: &JobId) -> Result<MatchStatistics, MatchingError> {
        self.compute_statistics_with(job_id, &DEFAULT_WEIGHTS)
    }

    pub fn compute_statistics_with(
        &self,
        job_id: &JobId,
        weights: &MatchWeights,
    ) -> Result<MatchStatistics, MatchingError> {
        let results = self.compute_matches(job_id, 0, weights)?;
        Ok(MatchStatistics::from_results(&results))
    }

    fn load(&self, job_id: &JobId) -> Result<(JobPosting, Vec<Candidate>), MatchingError> {
        let Some(mut job) = self.source.job(job_id)? else {
            warn!(%job_id, "match requested for unknown job");
            return Err(MatchingError::JobNotFound(job_id.clone()));
        };
        job.required_competencies = self.source.job_required_competency_ids(job_id)?;

        let mut pool = self.source.active_candidates()?;
        for candidate in &mut pool {
            candidate.competencies = self.source.candidate_competency_ids(&candidate.id)?;
        }

        Ok((job, pool))
    }
}

/// Run every factor scorer and fold them into the weighted composite.
pub fn score_candidate(
    candidate: &Candidate,
    job: &JobPosting,
    weights: &MatchWeights,
    as_of: NaiveDate,
) -> MatchResult {
    let components = factors::score_all(candidate, job, as_of);
    let score = weights.composite(&components);
    debug!(candidate_id = %candidate.id, score, "scored candidate");

    MatchResult {
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.name.clone(),
        score,
        components,
    }
}
