use chrono::NaiveDate;

use super::super::domain::{Candidate, FactorKind, JobPosting, SeniorityLevel};
use super::{to_score, FactorScore};

const DAYS_PER_YEAR: f64 = 365.25;

/// Mean of tenure in the target role and seniority distance.
pub(crate) fn score(candidate: &Candidate, job: &JobPosting, as_of: NaiveDate) -> FactorScore {
    let years = matched_years(candidate, job, as_of);
    let years_score = years_score(years, job.desired_years_in_role);

    let candidate_level = candidate.seniority.unwrap_or(SeniorityLevel::Junior);
    let level_score = level_score(candidate_level, job.seniority);

    let score = to_score((years_score as f64 + level_score as f64) / 2.0);
    let tenure = if job.desired_years_in_role > 0.0 {
        format!(
            "{years:.1} of {:.1} desired years in role",
            job.desired_years_in_role
        )
    } else {
        format!("{years:.1} years in role, no tenure requirement")
    };

    FactorScore::new(
        FactorKind::Experience,
        score,
        format!(
            "{tenure}; level {} vs {}",
            candidate_level.label(),
            job.seniority.label()
        ),
    )
}

/// Years across entries whose title contains the target role, or all entries when unset.
pub(crate) fn matched_years(candidate: &Candidate, job: &JobPosting, as_of: NaiveDate) -> f64 {
    let target = job
        .target_role
        .as_deref()
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_lowercase);

    candidate
        .experiences
        .iter()
        .filter(|entry| match &target {
            Some(role) => entry.title.to_lowercase().contains(role.as_str()),
            None => true,
        })
        .map(|entry| {
            let end = entry.end.unwrap_or(as_of);
            let days = (end - entry.start).num_days();
            if days > 0 {
                days as f64 / DAYS_PER_YEAR
            } else {
                0.0
            }
        })
        .sum()
}

pub(crate) fn years_score(matched_years: f64, desired_years: f64) -> u8 {
    if desired_years > 0.0 {
        to_score(100.0 * matched_years / desired_years)
    } else {
        100
    }
}

pub(crate) fn level_score(candidate: SeniorityLevel, job: SeniorityLevel) -> u8 {
    match candidate.ordinal().abs_diff(job.ordinal()) {
        0 => 100,
        1 => 80,
        2 => 60,
        3 => 40,
        _ => 20,
    }
}
