use std::collections::BTreeSet;

use super::domain::{Candidate, CandidateId, CompetencyId, JobId, JobPosting};

/// Read-only access to jobs and the active talent pool.
///
/// Competency links are exposed separately from the records so adapters backed by a join table
/// do not need to embed them; the engine hydrates both sides before scoring.
pub trait MatchDataSource: Send + Sync {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, DataSourceError>;
    /// Candidates eligible for matching. Status filtering happens here, not in the engine.
    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError>;
    fn candidate_competency_ids(
        &self,
        id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError>;
    fn job_required_competency_ids(
        &self,
        id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError>;
}

/// Infrastructure failure raised by a data source adapter.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}
