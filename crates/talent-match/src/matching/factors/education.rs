use super::super::domain::{Candidate, EducationEntry, FactorKind, JobPosting};
use super::{to_score, FactorScore};

const RELATED_FIELD_SCORE: u8 = 60;
const DEFICIT_PENALTY: i32 = 20;

/// Best-fit credential: each entry is scored on its own and the strongest one wins.
pub(crate) fn score(candidate: &Candidate, job: &JobPosting) -> FactorScore {
    let best = candidate
        .education
        .iter()
        .map(|entry| (entry_score(entry, job), entry))
        .max_by_key(|(score, _)| *score);

    match best {
        None => FactorScore::new(FactorKind::Education, 0, "no education history on file"),
        Some((score, entry)) => {
            let field = entry.field_of_study.trim();
            let notes = if field.is_empty() {
                format!("best credential: {}", entry.level.label())
            } else {
                format!("best credential: {} in {field}", entry.level.label())
            };
            FactorScore::new(FactorKind::Education, score, notes)
        }
    }
}

fn entry_score(entry: &EducationEntry, job: &JobPosting) -> u8 {
    let level = level_score(entry, job);
    let field = field_score(entry, job);
    to_score((level as f64 + field as f64) / 2.0)
}

fn level_score(entry: &EducationEntry, job: &JobPosting) -> u8 {
    let Some(minimum) = job.minimum_education else {
        return 100;
    };
    let deficit = minimum.ordinal() as i32 - entry.level.ordinal() as i32;
    if deficit <= 0 {
        100
    } else {
        (100 - DEFICIT_PENALTY * deficit).max(0) as u8
    }
}

fn field_score(entry: &EducationEntry, job: &JobPosting) -> u8 {
    let keywords: Vec<String> = job
        .desired_fields_of_study
        .iter()
        .map(|field| field.trim().to_lowercase())
        .filter(|field| !field.is_empty())
        .collect();
    if keywords.is_empty() {
        return 100;
    }

    let field = entry.field_of_study.to_lowercase();
    if keywords.iter().any(|keyword| field.contains(keyword.as_str())) {
        100
    } else {
        RELATED_FIELD_SCORE
    }
}
