use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::super::domain::{Candidate, FactorKind, JobPosting};
use super::FactorScore;

static RE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("amount pattern compiles"));
static RE_DOT_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:\.\d{3})+(?:,\d+)?$").expect("grouped pattern compiles"));
static RE_COMMA_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("grouped pattern compiles"));

/// Recognised perks, matched case-insensitively against the benefits text.
const PERK_KEYWORDS: [&str; 10] = [
    "plano de saúde",
    "plano de saude",
    "vale refeição",
    "vale refeicao",
    "vale alimentação",
    "vale alimentacao",
    "health plan",
    "health insurance",
    "meal voucher",
    "food voucher",
];
const PERK_FLOOR: u8 = 90;

/// Numeric bounds pulled from a free-text salary range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Read the first two amounts in the text. A single amount yields `min == max`.
pub fn extract_salary_range(text: &str) -> Option<SalaryRange> {
    let mut amounts = RE_AMOUNT
        .find_iter(text)
        .filter_map(|found| parse_amount(found.as_str()));

    let first = amounts.next()?;
    let second = amounts.next().unwrap_or(first);
    Some(SalaryRange {
        min: first.min(second),
        max: first.max(second),
    })
}

/// Accepts "8.000", "8.000,50", "8,000.50" and plain "8000".
fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = if RE_DOT_GROUPED.is_match(raw) {
        raw.replace('.', "").replace(',', ".")
    } else if RE_COMMA_GROUPED.is_match(raw) {
        raw.replace(',', "")
    } else {
        raw.replace(',', ".")
    };
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn score(candidate: &Candidate, job: &JobPosting) -> FactorScore {
    let Some(desired) = candidate.desired_salary else {
        return FactorScore::new(FactorKind::Salary, 0, "candidate has no salary expectation");
    };
    let Some(range) = job.salary_range.as_deref().and_then(extract_salary_range) else {
        return FactorScore::new(FactorKind::Salary, 0, "salary range could not be parsed");
    };

    let (mut score, mut notes) = if desired >= range.min && desired <= range.max {
        (100, "expectation within range".to_string())
    } else if desired < range.min && desired >= range.min * 0.8 {
        (90, "expectation up to 20% below range".to_string())
    } else if desired > range.max && desired <= range.max * 1.2 {
        (80, "expectation up to 20% above range".to_string())
    } else {
        (50, "expectation outside range".to_string())
    };

    if score < PERK_FLOOR && offers_recognised_perk(job.benefits.as_deref()) {
        score = PERK_FLOOR;
        notes.push_str(", offset by benefits package");
    }

    FactorScore::new(FactorKind::Salary, score, notes)
}

fn offers_recognised_perk(benefits: Option<&str>) -> bool {
    let Some(text) = benefits else {
        return false;
    };
    let text = text.to_lowercase();
    PERK_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
