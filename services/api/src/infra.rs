use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_match::error::AppError;
use talent_match::matching::{
    Candidate, CandidateId, CompetencyId, DataSourceError, JobId, JobPosting, MatchDataSource,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Pipeline status carried by candidate records in a dataset file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CandidateStatus {
    #[default]
    Active,
    Hired,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CandidateRecord {
    #[serde(flatten)]
    pub(crate) candidate: Candidate,
    #[serde(default)]
    pub(crate) status: CandidateStatus,
}

/// JSON snapshot of jobs and candidates used to hydrate the in-memory source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Dataset {
    #[serde(default)]
    pub(crate) jobs: Vec<JobPosting>,
    #[serde(default)]
    pub(crate) candidates: Vec<CandidateRecord>,
}

impl Dataset {
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let dataset = serde_json::from_str(&raw)?;
        Ok(dataset)
    }
}

/// Read-only source backed by a loaded [`Dataset`].
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryMatchDataSource {
    dataset: Dataset,
}

impl InMemoryMatchDataSource {
    pub(crate) fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub(crate) fn job_count(&self) -> usize {
        self.dataset.jobs.len()
    }

    pub(crate) fn candidate_count(&self) -> usize {
        self.dataset.candidates.len()
    }

    fn find_job(&self, id: &JobId) -> Option<&JobPosting> {
        self.dataset.jobs.iter().find(|job| &job.id == id)
    }
}

impl MatchDataSource for InMemoryMatchDataSource {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, DataSourceError> {
        Ok(self.find_job(id).cloned())
    }

    fn active_candidates(&self) -> Result<Vec<Candidate>, DataSourceError> {
        Ok(self
            .dataset
            .candidates
            .iter()
            .filter(|record| record.status == CandidateStatus::Active)
            .map(|record| record.candidate.clone())
            .collect())
    }

    fn candidate_competency_ids(
        &self,
        id: &CandidateId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self
            .dataset
            .candidates
            .iter()
            .find(|record| &record.candidate.id == id)
            .map(|record| record.candidate.competencies.clone())
            .unwrap_or_default())
    }

    fn job_required_competency_ids(
        &self,
        id: &JobId,
    ) -> Result<BTreeSet<CompetencyId>, DataSourceError> {
        Ok(self
            .find_job(id)
            .map(|job| job.required_competencies.clone())
            .unwrap_or_default())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = r#"{
        "jobs": [
            {
                "id": "job-1",
                "title": "Desenvolvedor Backend",
                "required_competencies": ["rust"],
                "seniority": "pleno",
                "location": { "label": "Remoto" },
                "salary_range": "R$ 6.000 a R$ 9.000"
            }
        ],
        "candidates": [
            { "id": "c-1", "name": "Carla", "competencies": ["rust"] },
            { "id": "c-2", "name": "Diego", "status": "hired" },
            { "id": "c-3", "name": "Elis", "status": "archived" }
        ]
    }"#;

    #[test]
    fn loads_dataset_and_filters_inactive_candidates() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(DATASET.as_bytes()).expect("write dataset");

        let dataset = Dataset::load(file.path()).expect("dataset parses");
        let source = InMemoryMatchDataSource::new(dataset);

        assert_eq!(source.job_count(), 1);
        assert_eq!(source.candidate_count(), 3);
        let active = source.active_candidates().expect("listing succeeds");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, CandidateId("c-1".to_string()));

        let job = source
            .job(&JobId("job-1".to_string()))
            .expect("lookup succeeds")
            .expect("job present");
        assert!(job.is_remote());
        assert_eq!(
            source
                .job_required_competency_ids(&job.id)
                .expect("links load")
                .len(),
            1
        );
    }

    #[test]
    fn malformed_dataset_is_reported() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ \"jobs\": [ { \"id\": 1 } ] }")
            .expect("write dataset");

        match Dataset::load(file.path()) {
            Err(AppError::Dataset(_)) => {}
            other => panic!("expected dataset error, got {other:?}"),
        }
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2025-06-01").is_ok());
        assert!(parse_date("01/06/2025").is_err());
    }
}
