use serde::{Deserialize, Serialize};

use super::super::domain::{AlternativeLegalBasis, LiaInput};
use super::super::error::LiaError;

const BLOCKED_RATIONALE: &str =
    "Alternative legal basis is available and should be used instead of legitimate interest.";
const AUTO_APPROVED_RATIONALE: &str =
    "Legal exception applies — legitimate interest is permitted by default.";
const RECOMMENDED_RATIONALE: &str = "Strong legitimate interest with low impact on data subjects.";
const CONDITIONAL_RATIONALE: &str =
    "Moderate balance — consider additional safeguards and review regularly.";
const NOT_RECOMMENDED_RATIONALE: &str =
    "High impact on data subjects or insufficient legitimate interest.";

/// Short-circuit classification taken before any weighting happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gate {
    Blocked,
    AutoApproved,
    Scored,
}

impl Gate {
    pub const fn label(self) -> &'static str {
        match self {
            Gate::Blocked => "Blocked",
            Gate::AutoApproved => "Auto-approved",
            Gate::Scored => "Scored",
        }
    }
}

/// Advisory outcome shown next to the two scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Recommended,
    Conditional,
    NotRecommended,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Recommended => "Recommended",
            Recommendation::Conditional => "Conditional",
            Recommendation::NotRecommended => "Not recommended",
        }
    }

    /// Fixed explanation for a scored recommendation.
    pub const fn rationale(self) -> &'static str {
        match self {
            Recommendation::Recommended => RECOMMENDED_RATIONALE,
            Recommendation::Conditional => CONDITIONAL_RATIONALE,
            Recommendation::NotRecommended => NOT_RECOMMENDED_RATIONALE,
        }
    }
}

/// Score bands used to classify a scored assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringPolicy {
    pub recommended_min_interest: u8,
    pub recommended_max_impact: u8,
    pub conditional_min_interest: u8,
    pub conditional_max_impact: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            recommended_min_interest: 60,
            recommended_max_impact: 40,
            conditional_min_interest: 40,
            conditional_max_impact: 60,
        }
    }
}

impl ScoringPolicy {
    /// Bands must be percentages and the recommended band must sit inside
    /// the conditional one.
    pub fn validate(&self) -> Result<(), LiaError> {
        let thresholds = [
            ("recommendedMinInterest", self.recommended_min_interest),
            ("recommendedMaxImpact", self.recommended_max_impact),
            ("conditionalMinInterest", self.conditional_min_interest),
            ("conditionalMaxImpact", self.conditional_max_impact),
        ];
        if let Some((name, value)) = thresholds.iter().find(|(_, value)| *value > 100) {
            return Err(LiaError::InvalidPolicy(format!(
                "{name} must be between 0 and 100, found {value}"
            )));
        }

        if self.recommended_min_interest < self.conditional_min_interest {
            return Err(LiaError::InvalidPolicy(format!(
                "recommended interest floor {} is below conditional floor {}",
                self.recommended_min_interest, self.conditional_min_interest
            )));
        }

        if self.recommended_max_impact > self.conditional_max_impact {
            return Err(LiaError::InvalidPolicy(format!(
                "recommended impact ceiling {} is above conditional ceiling {}",
                self.recommended_max_impact, self.conditional_max_impact
            )));
        }

        Ok(())
    }

    pub fn classify(&self, interest_score: u8, impact_score: u8) -> Recommendation {
        if interest_score >= self.recommended_min_interest
            && impact_score <= self.recommended_max_impact
        {
            Recommendation::Recommended
        } else if interest_score >= self.conditional_min_interest
            && impact_score <= self.conditional_max_impact
        {
            Recommendation::Conditional
        } else {
            Recommendation::NotRecommended
        }
    }
}

/// Blocking wins over the legal exception.
pub(crate) fn decide_gate(
    alternative_legal_basis: Option<AlternativeLegalBasis>,
    legal_exception: bool,
) -> Option<Gate> {
    match alternative_legal_basis {
        Some(AlternativeLegalBasis::None) if legal_exception => Some(Gate::AutoApproved),
        Some(AlternativeLegalBasis::None) => Some(Gate::Scored),
        Some(_) => Some(Gate::Blocked),
        None => None,
    }
}

pub(crate) fn gate_for(input: &LiaInput) -> Gate {
    decide_gate(Some(input.alternative_legal_basis), input.legal_exception)
        .unwrap_or(Gate::Scored)
}

pub(crate) fn gate_rationale(gate: Gate) -> Option<&'static str> {
    match gate {
        Gate::Blocked => Some(BLOCKED_RATIONALE),
        Gate::AutoApproved => Some(AUTO_APPROVED_RATIONALE),
        Gate::Scored => None,
    }
}
