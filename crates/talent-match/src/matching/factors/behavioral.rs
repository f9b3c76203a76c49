use super::super::domain::{Candidate, DiscProfile, DiscTolerance, FactorKind, JobPosting};
use super::{to_score, FactorScore};

/// Widest spread observed on a single DISC axis.
const MAX_AXIS_RANGE: f64 = 96.0;

pub(crate) fn score(candidate: &Candidate, job: &JobPosting) -> FactorScore {
    let (Some(profile), Some(ideal)) = (candidate.disc_profile, job.ideal_disc_profile) else {
        return FactorScore::new(FactorKind::Behavioral, 0, "DISC profile unavailable");
    };

    let axes = axis_scores(&profile, &ideal, &job.disc_tolerance);
    let mean = axes.iter().map(|(_, score)| score).sum::<f64>() / axes.len() as f64;
    let outside: Vec<String> = axes
        .iter()
        .filter(|(_, score)| *score < 100.0)
        .map(|(letter, _)| letter.to_string())
        .collect();

    let notes = if outside.is_empty() {
        "all DISC axes within tolerance".to_string()
    } else {
        format!("outside tolerance on {}", outside.join("/"))
    };
    FactorScore::new(FactorKind::Behavioral, to_score(mean), notes)
}

fn axis_scores(
    profile: &DiscProfile,
    ideal: &DiscProfile,
    tolerance: &DiscTolerance,
) -> Vec<(char, f64)> {
    profile
        .axes()
        .iter()
        .zip(ideal.axes().iter())
        .map(|((axis, value), (_, target))| {
            let diff = (value - target).abs();
            (axis.letter(), axis_score(diff, tolerance.for_axis(*axis)))
        })
        .collect()
}

pub(crate) fn axis_score(diff: f64, tolerance: f64) -> f64 {
    if diff <= tolerance {
        100.0
    } else {
        (100.0 - (diff / MAX_AXIS_RANGE) * 100.0).max(0.0)
    }
}
