use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates in the talent pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier for a competency in the shared skills catalogue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompetencyId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ranked experience levels used for level-distance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    #[serde(alias = "estagiario", alias = "estagio")]
    Intern,
    Junior,
    #[serde(alias = "pleno")]
    Mid,
    Senior,
    #[serde(alias = "especialista")]
    Specialist,
}

impl SeniorityLevel {
    pub const fn ordinal(self) -> u8 {
        match self {
            SeniorityLevel::Intern => 0,
            SeniorityLevel::Junior => 1,
            SeniorityLevel::Mid => 2,
            SeniorityLevel::Senior => 3,
            SeniorityLevel::Specialist => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SeniorityLevel::Intern => "intern",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Specialist => "specialist",
        }
    }
}

/// Formal education levels, ordered from elementary school to doctorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[serde(alias = "fundamental")]
    Elementary,
    #[serde(alias = "medio")]
    HighSchool,
    #[serde(alias = "tecnico")]
    Technical,
    #[serde(alias = "superior", alias = "graduacao")]
    Undergraduate,
    #[serde(alias = "pos_graduacao", alias = "especializacao")]
    Postgraduate,
    #[serde(alias = "mestrado")]
    Masters,
    #[serde(alias = "doutorado")]
    Doctorate,
}

impl EducationLevel {
    pub const fn ordinal(self) -> u8 {
        match self {
            EducationLevel::Elementary => 1,
            EducationLevel::HighSchool => 2,
            EducationLevel::Technical => 3,
            EducationLevel::Undergraduate => 4,
            EducationLevel::Postgraduate => 5,
            EducationLevel::Masters => 6,
            EducationLevel::Doctorate => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::Elementary => "elementary",
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Technical => "technical",
            EducationLevel::Undergraduate => "undergraduate",
            EducationLevel::Postgraduate => "postgraduate",
            EducationLevel::Masters => "masters",
            EducationLevel::Doctorate => "doctorate",
        }
    }
}

/// One position held by the candidate. A missing `end` marks the current role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub level: EducationLevel,
    #[serde(default)]
    pub field_of_study: String,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a candidate lives or a job is based. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Location {
    pub fn label_text(&self) -> &str {
        self.label.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Dominance/Influence/Steadiness/Conformity axes, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscProfile {
    pub dominance: f64,
    pub influence: f64,
    pub steadiness: f64,
    pub conformity: f64,
}

impl DiscProfile {
    pub fn axes(&self) -> [(DiscAxis, f64); 4] {
        [
            (DiscAxis::Dominance, self.dominance),
            (DiscAxis::Influence, self.influence),
            (DiscAxis::Steadiness, self.steadiness),
            (DiscAxis::Conformity, self.conformity),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscAxis {
    Dominance,
    Influence,
    Steadiness,
    Conformity,
}

impl DiscAxis {
    pub const fn letter(self) -> char {
        match self {
            DiscAxis::Dominance => 'D',
            DiscAxis::Influence => 'I',
            DiscAxis::Steadiness => 'S',
            DiscAxis::Conformity => 'C',
        }
    }
}

/// Per-axis allowed deviation; unset axes fall back to [`DiscTolerance::DEFAULT_AXIS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscTolerance {
    #[serde(default)]
    pub dominance: Option<f64>,
    #[serde(default)]
    pub influence: Option<f64>,
    #[serde(default)]
    pub steadiness: Option<f64>,
    #[serde(default)]
    pub conformity: Option<f64>,
}

impl DiscTolerance {
    pub const DEFAULT_AXIS: f64 = 20.0;

    pub fn for_axis(&self, axis: DiscAxis) -> f64 {
        let value = match axis {
            DiscAxis::Dominance => self.dominance,
            DiscAxis::Influence => self.influence,
            DiscAxis::Steadiness => self.steadiness,
            DiscAxis::Conformity => self.conformity,
        };
        value.unwrap_or(Self::DEFAULT_AXIS)
    }
}

/// Candidate record as read from the talent pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub competencies: BTreeSet<CompetencyId>,
    /// Self-declared level; scoring treats an absent value as junior.
    #[serde(default)]
    pub seniority: Option<SeniorityLevel>,
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub willing_to_relocate: Option<bool>,
    #[serde(default)]
    pub desired_salary: Option<f64>,
    #[serde(default)]
    pub disc_profile: Option<DiscProfile>,
}

/// Job posting requirements consumed by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required_competencies: BTreeSet<CompetencyId>,
    pub seniority: SeniorityLevel,
    /// Zero means no tenure constraint.
    #[serde(default)]
    pub desired_years_in_role: f64,
    /// Matched case-insensitively as a substring of experience titles.
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub minimum_education: Option<EducationLevel>,
    #[serde(default)]
    pub desired_fields_of_study: Vec<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub remote: bool,
    /// Free text such as "R$ 8.000 - R$ 12.000".
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub ideal_disc_profile: Option<DiscProfile>,
    #[serde(default)]
    pub disc_tolerance: DiscTolerance,
}

const REMOTE_SIGNALS: [&str; 3] = ["remoto", "home office", "remote"];

impl JobPosting {
    /// True when the job is flagged remote or its location text says so.
    pub fn is_remote(&self) -> bool {
        if self.remote {
            return true;
        }
        let text = self.location.label_text().to_lowercase();
        REMOTE_SIGNALS.iter().any(|signal| text.contains(signal))
    }
}

/// The six independent scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Competency,
    Experience,
    Education,
    Location,
    Salary,
    Behavioral,
}

impl FactorKind {
    pub const ALL: [FactorKind; 6] = [
        FactorKind::Competency,
        FactorKind::Experience,
        FactorKind::Education,
        FactorKind::Location,
        FactorKind::Salary,
        FactorKind::Behavioral,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Competency => "competency",
            FactorKind::Experience => "experience",
            FactorKind::Education => "education",
            FactorKind::Location => "location",
            FactorKind::Salary => "salary",
            FactorKind::Behavioral => "behavioral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with_label(label: Option<&str>, remote: bool) -> JobPosting {
        JobPosting {
            id: JobId("job-1".to_string()),
            title: "Backend".to_string(),
            required_competencies: BTreeSet::new(),
            seniority: SeniorityLevel::Mid,
            desired_years_in_role: 0.0,
            target_role: None,
            minimum_education: None,
            desired_fields_of_study: Vec::new(),
            location: Location {
                coordinates: None,
                label: label.map(str::to_string),
            },
            remote,
            salary_range: None,
            benefits: None,
            ideal_disc_profile: None,
            disc_tolerance: DiscTolerance::default(),
        }
    }

    #[test]
    fn remote_detected_from_flag_or_wording() {
        assert!(job_with_label(None, true).is_remote());
        assert!(job_with_label(Some("100% Remoto"), false).is_remote());
        assert!(job_with_label(Some("Home Office - Brasil"), false).is_remote());
        assert!(!job_with_label(Some("Campinas, SP"), false).is_remote());
    }

    #[test]
    fn portuguese_aliases_deserialize() {
        let level: SeniorityLevel = serde_json::from_str("\"pleno\"").expect("alias parses");
        assert_eq!(level, SeniorityLevel::Mid);
        let education: EducationLevel =
            serde_json::from_str("\"mestrado\"").expect("alias parses");
        assert_eq!(education, EducationLevel::Masters);
    }

    #[test]
    fn tolerance_defaults_per_axis() {
        let tolerance = DiscTolerance {
            influence: Some(5.0),
            ..DiscTolerance::default()
        };
        assert_eq!(tolerance.for_axis(DiscAxis::Dominance), 20.0);
        assert_eq!(tolerance.for_axis(DiscAxis::Influence), 5.0);
    }
}
