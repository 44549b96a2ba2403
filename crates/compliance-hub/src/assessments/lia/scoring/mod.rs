mod policy;
mod rules;

pub use policy::{Gate, Recommendation, ScoringPolicy};

use super::domain::{AlternativeLegalBasis, ClosedOption, LiaAnswers, LiaInput};
use super::draft::LiaDraft;
use super::error::LiaError;
use policy::{decide_gate, gate_for, gate_rationale};
use rules::{normalize, score_input, IMPACT_NORMALIZER, INTEREST_NORMALIZER};
use serde::{Deserialize, Serialize};

/// Which of the two scores a component feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreAxis {
    Interest,
    Impact,
}

/// Questionnaire factor behind a score component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiaFactor {
    Necessity,
    Relationship,
    InteractionFrequency,
    DataObtainment,
    RightToObject,
    PrejudiceToController,
    PrejudiceToThirdParty,
    Expectations,
    DecisionPower,
    InformedTiming,
    AddedValue,
    NegativeImpact,
    UnwarrantedHarm,
}

impl LiaFactor {
    pub const fn label(self) -> &'static str {
        match self {
            LiaFactor::Necessity => "necessity",
            LiaFactor::Relationship => "relationship",
            LiaFactor::InteractionFrequency => "interaction frequency",
            LiaFactor::DataObtainment => "data obtainment",
            LiaFactor::RightToObject => "right to object",
            LiaFactor::PrejudiceToController => "prejudice to controller",
            LiaFactor::PrejudiceToThirdParty => "prejudice to third party",
            LiaFactor::Expectations => "reasonable expectations",
            LiaFactor::DecisionPower => "decision power",
            LiaFactor::InformedTiming => "informed timing",
            LiaFactor::AddedValue => "added value",
            LiaFactor::NegativeImpact => "negative impact",
            LiaFactor::UnwarrantedHarm => "unwarranted harm",
        }
    }
}

/// Discrete signed contribution to one of the raw sums, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub axis: ScoreAxis,
    pub factor: LiaFactor,
    pub weight: f64,
    pub notes: String,
}

/// Raw sums behind a scored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub raw_interest: f64,
    pub raw_impact: f64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn components_for(&self, axis: ScoreAxis) -> impl Iterator<Item = &ScoreComponent> {
        self.components
            .iter()
            .filter(move |component| component.axis == axis)
    }
}

/// Engine output rendered by the conclusion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiaResult {
    pub gate: Gate,
    pub interest_score: u8,
    pub impact_score: u8,
    pub recommendation: Recommendation,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl LiaResult {
    fn blocked() -> Self {
        Self::gated(Gate::Blocked, 0, 100, Recommendation::NotRecommended)
    }

    fn auto_approved() -> Self {
        Self::gated(Gate::AutoApproved, 100, 0, Recommendation::Recommended)
    }

    fn gated(gate: Gate, interest_score: u8, impact_score: u8, rec: Recommendation) -> Self {
        Self {
            gate,
            interest_score,
            impact_score,
            recommendation: rec,
            rationale: gate_rationale(gate)
                .unwrap_or_else(|| rec.rationale())
                .to_string(),
            breakdown: None,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (interest {}%, impact {}%): {}",
            self.recommendation.label(),
            self.interest_score,
            self.impact_score,
            self.rationale
        )
    }
}

/// Live-preview answer for a draft that may still have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LiaPreview {
    Ready { result: LiaResult },
    Incomplete { missing: Vec<String> },
}

/// Stateless evaluator applying the classification bands to answers.
#[derive(Debug, Clone, Default)]
pub struct LiaEngine {
    policy: ScoringPolicy,
}

impl LiaEngine {
    pub fn new(policy: ScoringPolicy) -> Result<Self, LiaError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn assess(&self, input: &LiaInput) -> LiaResult {
        match gate_for(input) {
            Gate::Blocked => LiaResult::blocked(),
            Gate::AutoApproved => LiaResult::auto_approved(),
            Gate::Scored => self.score(input),
        }
    }

    /// Parse wire answers and assess them.
    ///
    /// The gate is decided from the legal basis and exception alone, so the
    /// remaining selects are only validated when the answers get scored.
    pub fn evaluate(&self, answers: &LiaAnswers) -> Result<LiaResult, LiaError> {
        let basis = AlternativeLegalBasis::parse(&answers.alternative_legal_basis)?;
        match decide_gate(Some(basis), answers.legal_exception) {
            Some(Gate::Blocked) => Ok(LiaResult::blocked()),
            Some(Gate::AutoApproved) => Ok(LiaResult::auto_approved()),
            Some(Gate::Scored) | None => {
                let input = answers.parse()?;
                Ok(self.assess(&input))
            }
        }
    }

    /// Gate as early as the answers allow, otherwise report the gaps.
    pub fn preview(&self, draft: &LiaDraft) -> LiaPreview {
        match decide_gate(draft.alternative_legal_basis, draft.legal_exception) {
            Some(Gate::Blocked) => {
                return LiaPreview::Ready {
                    result: LiaResult::blocked(),
                }
            }
            Some(Gate::AutoApproved) => {
                return LiaPreview::Ready {
                    result: LiaResult::auto_approved(),
                }
            }
            Some(Gate::Scored) | None => {}
        }

        match draft.complete() {
            Ok(input) => LiaPreview::Ready {
                result: self.assess(&input),
            },
            Err(_) => LiaPreview::Incomplete {
                missing: draft
                    .missing_fields()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
        }
    }

    fn score(&self, input: &LiaInput) -> LiaResult {
        let breakdown = score_input(input);
        let interest_score = normalize(breakdown.raw_interest, INTEREST_NORMALIZER);
        let impact_score = normalize(breakdown.raw_impact, IMPACT_NORMALIZER);
        let recommendation = self.policy.classify(interest_score, impact_score);

        LiaResult {
            gate: Gate::Scored,
            interest_score,
            impact_score,
            recommendation,
            rationale: recommendation.rationale().to_string(),
            breakdown: Some(breakdown),
        }
    }
}

/// Assess a completed questionnaire with the default bands.
pub fn compute_lia(input: &LiaInput) -> LiaResult {
    LiaEngine::default().assess(input)
}

/// Validate wire answers and assess them with the default bands.
pub fn evaluate_answers(answers: &LiaAnswers) -> Result<LiaResult, LiaError> {
    LiaEngine::default().evaluate(answers)
}
