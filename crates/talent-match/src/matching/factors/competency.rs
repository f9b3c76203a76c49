use super::super::domain::{Candidate, FactorKind, JobPosting};
use super::{to_score, FactorScore};

/// Share of required competencies the candidate holds, by exact identifier.
pub(crate) fn score(candidate: &Candidate, job: &JobPosting) -> FactorScore {
    let required = &job.required_competencies;
    if required.is_empty() {
        return FactorScore::new(FactorKind::Competency, 100, "job lists no required competencies");
    }
    if candidate.competencies.is_empty() {
        return FactorScore::new(
            FactorKind::Competency,
            0,
            "candidate has no registered competencies",
        );
    }

    let matched = required.intersection(&candidate.competencies).count();
    let score = to_score(100.0 * matched as f64 / required.len() as f64);

    FactorScore::new(
        FactorKind::Competency,
        score,
        format!("{matched} of {} required competencies", required.len()),
    )
}
