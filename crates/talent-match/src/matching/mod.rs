//! Candidate to job compatibility matching.
//!
//! A run loads one job and the active candidate pool from a [`MatchDataSource`], scores every
//! candidate on six independent factors, folds them into a weighted composite, filters by a
//! minimum score, and ranks the survivors. Scoring is deterministic for a fixed reference date:
//! there is no cached or shared mutable state between runs.

pub mod domain;
pub mod engine;
pub mod factors;
pub mod repository;
pub mod router;
pub mod statistics;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateId, CompetencyId, DiscAxis, DiscProfile, DiscTolerance, EducationEntry,
    EducationLevel, ExperienceEntry, FactorKind, GeoPoint, JobId, JobPosting, Location,
    SeniorityLevel,
};
pub use engine::{score_candidate, MatchEngine, MatchResult, MatchingError, DEFAULT_MIN_SCORE};
pub use factors::{extract_salary_range, score_all, FactorScore, SalaryRange};
pub use repository::{DataSourceError, MatchDataSource};
pub use router::{match_router, MatchRequest, MatchResponse};
pub use statistics::{HistogramBucket, MatchStatistics};
pub use weights::{MatchWeights, DEFAULT_WEIGHTS};
