use serde::{Deserialize, Serialize};

use super::domain::FactorKind;
use super::factors::FactorScore;

/// Default factor weights used when a caller supplies none.
pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    competency: 0.40,
    experience: 0.20,
    education: 0.10,
    location: 0.10,
    salary: 0.10,
    behavioral: 0.10,
};

/// Weighting policy applied to the six factor scores.
///
/// The engine applies whatever values it receives. Enforcing a fixed total is left to the
/// configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub competency: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub salary: f64,
    pub behavioral: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MatchWeights {
    /// Build from percentages in [`FactorKind::ALL`] order, e.g. `[40, 20, 10, 10, 10, 10]`.
    pub fn from_percentages(values: [f64; 6]) -> Self {
        let [competency, experience, education, location, salary, behavioral] =
            values.map(|value| value / 100.0);
        Self {
            competency,
            experience,
            education,
            location,
            salary,
            behavioral,
        }
    }

    pub fn weight(&self, factor: FactorKind) -> f64 {
        match factor {
            FactorKind::Competency => self.competency,
            FactorKind::Experience => self.experience,
            FactorKind::Education => self.education,
            FactorKind::Location => self.location,
            FactorKind::Salary => self.salary,
            FactorKind::Behavioral => self.behavioral,
        }
    }

    pub fn sum(&self) -> f64 {
        FactorKind::ALL
            .iter()
            .map(|factor| self.weight(*factor))
            .sum()
    }

    /// First factor carrying a negative or non-finite weight.
    pub fn invalid_factor(&self) -> Option<FactorKind> {
        FactorKind::ALL.into_iter().find(|factor| {
            let weight = self.weight(*factor);
            !weight.is_finite() || weight < 0.0
        })
    }

    /// Rounded weighted sum, saturated into 0-100.
    pub fn composite(&self, components: &[FactorScore]) -> u8 {
        let total: f64 = components
            .iter()
            .map(|component| component.score as f64 * self.weight(component.factor))
            .sum();
        if !total.is_finite() {
            return 0;
        }
        total.round().clamp(0.0, 100.0) as u8
    }
}
