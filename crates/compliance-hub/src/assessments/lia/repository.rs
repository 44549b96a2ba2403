use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::LiaInput;
use super::scoring::{Gate, LiaResult, Recommendation};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Human decision recorded after reading the engine's advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionOutcome {
    Proceed,
    DoNotProceed,
}

impl DecisionOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionOutcome::Proceed => "proceed with legitimate interest",
            DecisionOutcome::DoNotProceed => "do not rely on legitimate interest",
        }
    }

    pub fn agrees_with(self, recommendation: Recommendation) -> bool {
        match self {
            DecisionOutcome::Proceed => recommendation != Recommendation::NotRecommended,
            DecisionOutcome::DoNotProceed => recommendation == Recommendation::NotRecommended,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalDecision {
    pub outcome: DecisionOutcome,
    pub notes: String,
    pub decided_by: String,
    pub decided_at: DateTime<Utc>,
}

/// Stored assessment: answers, computed advice, and the human sign-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiaAssessment {
    pub id: AssessmentId,
    pub processing_activity: String,
    pub answers: LiaInput,
    /// Free-text justifications keyed by questionnaire field. Never scored.
    pub justifications: BTreeMap<String, String>,
    pub result: LiaResult,
    pub final_decision: Option<FinalDecision>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every stored change; updates must name the revision they read.
    #[serde(default)]
    pub revision: u64,
}

impl LiaAssessment {
    pub fn status(&self) -> AssessmentStatus {
        match &self.final_decision {
            None => AssessmentStatus::AwaitingDecision,
            Some(decision) if decision.outcome.agrees_with(self.result.recommendation) => {
                AssessmentStatus::Decided
            }
            Some(_) => AssessmentStatus::Overridden,
        }
    }

    pub fn overrides_recommendation(&self) -> bool {
        self.status() == AssessmentStatus::Overridden
    }

    pub fn view(&self) -> AssessmentView {
        AssessmentView {
            id: self.id.clone(),
            processing_activity: self.processing_activity.clone(),
            status: self.status(),
            gate: self.result.gate,
            interest_score: self.result.interest_score,
            impact_score: self.result.impact_score,
            recommendation: self.result.recommendation,
            rationale: self.result.rationale.clone(),
            final_decision: self.final_decision.clone(),
            created_at: self.created_at,
            revision: self.revision,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    AwaitingDecision,
    Decided,
    Overridden,
}

/// Summary of an assessment exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentView {
    pub id: AssessmentId,
    pub processing_activity: String,
    pub status: AssessmentStatus,
    pub gate: Gate,
    pub interest_score: u8,
    pub impact_score: u8,
    pub recommendation: Recommendation,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_decision: Option<FinalDecision>,
    pub created_at: DateTime<Utc>,
    pub revision: u64,
}

/// Storage abstraction so the service can run against any backend.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: LiaAssessment) -> Result<LiaAssessment, RepositoryError>;
    /// Replace a stored assessment. Fails with `Conflict` when the stored
    /// revision is no longer `expected_revision`.
    fn update(
        &self,
        assessment: LiaAssessment,
        expected_revision: u64,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<LiaAssessment>, RepositoryError>;
    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<LiaAssessment>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment already exists or was changed concurrently")]
    Conflict,
    #[error("assessment not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
