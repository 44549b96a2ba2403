use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::LiaAnswers;
use super::draft::{LiaDraft, LiaDraftAnswers};
use super::error::LiaError;
use super::repository::{
    AssessmentId, AssessmentRepository, DecisionOutcome, FinalDecision, LiaAssessment,
    RepositoryError,
};
use super::scoring::{LiaEngine, LiaPreview, LiaResult};

/// Request to record a new assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssessment {
    pub processing_activity: String,
    pub answers: LiaAnswers,
    #[serde(default)]
    pub justifications: BTreeMap<String, String>,
}

/// Request to record the human sign-off on an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub outcome: DecisionOutcome,
    #[serde(default)]
    pub notes: String,
    pub decided_by: String,
}

/// Service composing the scoring engine with assessment storage.
pub struct LiaAssessmentService<R> {
    repository: Arc<R>,
    engine: Arc<LiaEngine>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("lia-{id:06}"))
}

impl<R> LiaAssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: LiaEngine) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &LiaEngine {
        &self.engine
    }

    /// Score wire answers without storing anything.
    pub fn evaluate(&self, answers: &LiaAnswers) -> Result<LiaResult, LiaServiceError> {
        let result = self.engine.evaluate(answers)?;
        debug!(gate = ?result.gate, recommendation = ?result.recommendation, "evaluated answers");
        Ok(result)
    }

    pub fn preview(&self, draft: &LiaDraft) -> LiaPreview {
        self.engine.preview(draft)
    }

    /// Preview a wizard draft posted with string selects.
    pub fn preview_answers(
        &self,
        answers: &LiaDraftAnswers,
    ) -> Result<LiaPreview, LiaServiceError> {
        let draft = answers.parse()?;
        Ok(self.engine.preview(&draft))
    }

    /// Score and store a new assessment.
    pub fn create(&self, request: NewAssessment) -> Result<LiaAssessment, LiaServiceError> {
        let processing_activity = request.processing_activity.trim().to_string();
        if processing_activity.is_empty() {
            return Err(LiaServiceError::MissingProcessingActivity);
        }

        let answers = request.answers.parse()?;
        let result = self.engine.assess(&answers);

        let assessment = LiaAssessment {
            id: next_assessment_id(),
            processing_activity,
            answers,
            justifications: request.justifications,
            result,
            final_decision: None,
            created_at: Utc::now(),
            revision: 0,
        };

        let stored = self.repository.insert(assessment)?;
        info!(
            assessment_id = %stored.id.0,
            gate = ?stored.result.gate,
            interest = stored.result.interest_score,
            impact = stored.result.impact_score,
            "legitimate interest assessment recorded"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<LiaAssessment, LiaServiceError> {
        let assessment = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<LiaAssessment>, LiaServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    /// Store the final decision. The computed result is left untouched.
    pub fn record_decision(
        &self,
        id: &AssessmentId,
        request: DecisionRequest,
    ) -> Result<LiaAssessment, LiaServiceError> {
        let decided_by = request.decided_by.trim().to_string();
        if decided_by.is_empty() {
            return Err(LiaServiceError::MissingDecisionOwner);
        }

        let mut assessment = self.get(id)?;
        let read_revision = assessment.revision;
        assessment.final_decision = Some(FinalDecision {
            outcome: request.outcome,
            notes: request.notes,
            decided_by,
            decided_at: Utc::now(),
        });
        assessment.revision = read_revision + 1;
        self.repository.update(assessment.clone(), read_revision)?;

        if assessment.overrides_recommendation() {
            info!(
                assessment_id = %assessment.id.0,
                recommendation = ?assessment.result.recommendation,
                outcome = ?request.outcome,
                "final decision overrides engine recommendation"
            );
        }

        Ok(assessment)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum LiaServiceError {
    #[error(transparent)]
    Assessment(#[from] LiaError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("processing activity name is required")]
    MissingProcessingActivity,
    #[error("final decision must name who decided")]
    MissingDecisionOwner,
}
