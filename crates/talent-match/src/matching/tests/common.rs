use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::matching::domain::{
    Candidate, CandidateId, CompetencyId, DiscProfile, DiscTolerance, EducationEntry,
    EducationLevel, ExperienceEntry, GeoPoint, JobId, JobPosting, Location, SeniorityLevel,
};
use crate::matching::repository::{DataSourceError, MatchDataSource};
use crate::matching::MatchEngine;

pub(super) const SAO_PAULO: GeoPoint = GeoPoint {
    latitude: -23.5505,
    longitude: -46.6333,
};
pub(super) const CAMPINAS: GeoPoint = GeoPoint {
    latitude: -22.9056,
    longitude: -47.0608,
};
pub(super) const RECIFE: GeoPoint = GeoPoint {
    latitude: -8.0476,
    longitude: -34.8770,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn as_of() -> NaiveDate {
    date(2025, 6, 1)
}

pub(super) fn competencies(ids: &[&str]) -> BTreeSet<CompetencyId> {
    ids.iter().map(|id| CompetencyId(id.to_string())).collect()
}

pub(super) fn disc(dominance: f64, influence: f64, steadiness: f64, conformity: f64) -> DiscProfile {
    DiscProfile {
        dominance,
        influence,
        steadiness,
        conformity,
    }
}

pub(super) fn backend_job() -> JobPosting {
    JobPosting {
        id: JobId("job-backend".to_string()),
        title: "Senior Backend Engineer".to_string(),
        required_competencies: competencies(&["rust", "sql", "aws"]),
        seniority: SeniorityLevel::Senior,
        desired_years_in_role: 4.0,
        target_role: Some("backend".to_string()),
        minimum_education: Some(EducationLevel::Undergraduate),
        desired_fields_of_study: vec!["Computação".to_string(), "Sistemas".to_string()],
        location: Location {
            coordinates: Some(SAO_PAULO),
            label: Some("São Paulo, SP".to_string()),
        },
        remote: false,
        salary_range: Some("R$ 8.000 - R$ 12.000".to_string()),
        benefits: Some("Gympass, day off no aniversário".to_string()),
        ideal_disc_profile: Some(disc(75.0, 60.0, 40.0, 80.0)),
        disc_tolerance: DiscTolerance::default(),
    }
}

/// Scores 100 on every factor against [`backend_job`].
pub(super) fn strong_candidate(id: &str) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: "Ana Souza".to_string(),
        competencies: competencies(&["rust", "sql", "aws", "kafka"]),
        seniority: Some(SeniorityLevel::Senior),
        experiences: vec![ExperienceEntry {
            title: "Backend Engineer".to_string(),
            start: date(2019, 1, 1),
            end: None,
        }],
        education: vec![EducationEntry {
            level: EducationLevel::Undergraduate,
            field_of_study: "Ciência da Computação".to_string(),
        }],
        location: Location {
            coordinates: Some(SAO_PAULO),
            label: Some("São Paulo".to_string()),
        },
        willing_to_relocate: None,
        desired_salary: Some(10_000.0),
        disc_profile: Some(disc(70.0, 65.0, 45.0, 85.0)),
    }
}

/// Partial fit: composite 72 against [`backend_job`].
pub(super) fn mid_candidate(id: &str) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: "Bruno Lima".to_string(),
        competencies: competencies(&["rust", "sql"]),
        seniority: Some(SeniorityLevel::Junior),
        experiences: vec![
            ExperienceEntry {
                title: "Backend Developer".to_string(),
                start: date(2023, 6, 1),
                end: Some(date(2025, 6, 1)),
            },
            ExperienceEntry {
                title: "Support Analyst".to_string(),
                start: date(2020, 1, 1),
                end: Some(date(2023, 5, 1)),
            },
        ],
        education: vec![EducationEntry {
            level: EducationLevel::Technical,
            field_of_study: "Análise de Sistemas".to_string(),
        }],
        location: Location {
            coordinates: Some(CAMPINAS),
            label: Some("Campinas".to_string()),
        },
        willing_to_relocate: Some(false),
        desired_salary: Some(7_000.0),
        disc_profile: Some(disc(30.0, 60.0, 40.0, 80.0)),
    }
}

/// Carries nothing beyond an identifier.
pub(super) fn sparse_candidate(id: &str) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: String::new(),
        competencies: BTreeSet::new(),
        seniority: None,
        experiences: Vec::new(),
        education: Vec::new(),
        location: Location::default(),
        willing_to_relocate: None,
        desired_salary: None,
        disc_profile: None,
    }
}

/// Data source whose records carry their own competency sets.
#[derive(Default)]
pub(super) struct MemorySource {
    pub(super) jobs: Vec<JobPosting>,
    pub(super) candidates: Vec<Candidate>,
}

impl MemorySource {
    pub(super) fn new(jobs: Vec<JobPosting>, candidates: Vec<Candidate>) -> Self {
        Self { jobs, candidates }
    }
}

impl MatchDataSource for MemorySource {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, DataSourceError> {
        Ok(self.jobs.iter().find(|job| &job.id == id).cloned())
    }

    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError> {
        Ok(self.candidates.clone())
    }

    fn candidate_competency_ids(
        &self,
        id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self
            .candidates
            .iter()
            .find(|candidate| &candidate.id == id)
            .map(|candidate| candidate.competencies.clone())
            .unwrap_or_default())
    }

    fn job_required_competency_ids(
        &self,
        id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self
            .jobs
            .iter()
            .find(|job| &job.id == id)
            .map(|job| job.required_competencies.clone())
            .unwrap_or_default())
    }
}

/// Data source that keeps competency links apart from the records, like a join table.
#[derive(Default)]
pub(super) struct LinkTableSource {
    pub(super) jobs: Vec<JobPosting>,
    pub(super) candidates: Vec<Candidate>,
    pub(super) job_links: HashMap<JobId, BTreeSet<CompetencyId>>,
    pub(super) candidate_links: HashMap<CandidateId, BTreeSet<CompetencyId>>,
}

impl MatchDataSource for LinkTableSource {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, DataSourceError> {
        Ok(self.jobs.iter().find(|job| &job.id == id).cloned())
    }

    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError> {
        Ok(self.candidates.clone())
    }

    fn candidate_competency_ids(
        &self,
        id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self.candidate_links.get(id).cloned().unwrap_or_default())
    }

    fn job_required_competency_ids(
        &self,
        id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self.job_links.get(id).cloned().unwrap_or_default())
    }
}

/// Data source whose candidate listing always fails.
pub(super) struct UnavailableSource;

impl MatchDataSource for UnavailableSource {
    fn job(&self, _id: &JobId) -> Result<Option<JobPosting>, DataSourceError> {
        Ok(Some(backend_job()))
    }

    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError> {
        Err(DataSourceError::Unavailable("talent pool offline".to_string()))
    }

    fn candidate_competency_ids(
        &self,
        _id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Err(DataSourceError::Unavailable("talent pool offline".to_string()))
    }

    fn job_required_competency_ids(
        &self,
        _id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(BTreeSet::new())
    }
}

/// Wraps another source and stalls the candidate listing.
pub(super) struct SlowSource {
    pub(super) inner: MemorySource,
    pub(super) delay: Duration,
}

impl MatchDataSource for SlowSource {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, DataSourceError> {
        self.inner.job(id)
    }

    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError> {
        std::thread::sleep(self.delay);
        self.inner.active_candidates()
    }

    fn candidate_competency_ids(
        &self,
        id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        self.inner.candidate_competency_ids(id)
    }

    fn job_required_competency_ids(
        &self,
        id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        self.inner.job_required_competency_ids(id)
    }
}

/// Pool of `[sparse, mid, strong]` scored against [`backend_job`].
pub(super) fn standard_engine() -> MatchEngine<MemorySource> {
    let source = MemorySource::new(
        vec![backend_job()],
        vec![
            sparse_candidate("cand-sparse"),
            mid_candidate("cand-mid"),
            strong_candidate("cand-strong"),
        ],
    );
    MatchEngine::new(Arc::new(source)).with_reference_date(as_of())
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::default()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
