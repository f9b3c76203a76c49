use super::super::domain::{Candidate, FactorKind, GeoPoint, JobPosting};
use super::FactorScore;

const EARTH_RADIUS_KM: f64 = 6371.0;
const RELOCATION_FLOOR: u8 = 80;

/// Distance bands in kilometres, checked in order.
const DISTANCE_BANDS: [(f64, u8); 6] = [
    (10.0, 100),
    (30.0, 90),
    (50.0, 80),
    (100.0, 70),
    (200.0, 60),
    (500.0, 50),
];
const FAR_SCORE: u8 = 30;

pub(crate) fn score(candidate: &Candidate, job: &JobPosting) -> FactorScore {
    if job.is_remote() {
        return FactorScore::new(FactorKind::Location, 100, "remote position");
    }

    match (candidate.location.coordinates, job.location.coordinates) {
        (Some(from), Some(to)) => {
            let distance = haversine_km(from, to);
            let mut score = distance_score(distance);
            let mut notes = format!("{distance:.1} km from job site");
            if candidate.willing_to_relocate == Some(true) && score < RELOCATION_FLOOR {
                score = RELOCATION_FLOOR;
                notes.push_str(", willing to relocate");
            }
            FactorScore::new(FactorKind::Location, score, notes)
        }
        _ => text_score(candidate.location.label_text(), job.location.label_text()),
    }
}

fn text_score(candidate: &str, job: &str) -> FactorScore {
    if candidate.is_empty() || job.is_empty() {
        return FactorScore::new(FactorKind::Location, 0, "location not informed");
    }

    let candidate = candidate.to_lowercase();
    let job = job.to_lowercase();
    let (score, notes) = if candidate == job {
        (100, "same city")
    } else if candidate.contains(job.as_str()) || job.contains(candidate.as_str()) {
        (80, "overlapping location")
    } else {
        (40, "different location")
    };
    FactorScore::new(FactorKind::Location, score, notes)
}

pub(crate) fn distance_score(distance_km: f64) -> u8 {
    DISTANCE_BANDS
        .iter()
        .find(|(limit, _)| distance_km <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(FAR_SCORE)
}

/// Great-circle distance between two points.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
