//! Legitimate Interest Assessment (LIA) scoring, preview, and recordkeeping.
//!
//! The scoring engine is a pure function of the questionnaire: it gates on the
//! availability of another legal basis or a legal exception, otherwise weighs
//! the answers into a normalized interest score and impact score and classifies
//! the balance. The service and router layers store the advice next to the
//! human final decision, which never feeds back into scoring.

pub mod domain;
pub mod draft;
mod error;
pub mod repository;
pub mod router;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AlternativeLegalBasis, BalanceAnswers, ClosedOption, DataObtainment, DecisionPower,
    Importance, InformedTiming, InteractionFrequency, LiaAnswers, LiaInput, Relationship,
};
pub use draft::{LiaAnswer, LiaDraft, LiaDraftAnswers};
pub use error::LiaError;
pub use repository::{
    AssessmentId, AssessmentRepository, AssessmentStatus, AssessmentView, DecisionOutcome,
    FinalDecision, LiaAssessment, RepositoryError,
};
pub use router::lia_router;
pub use scoring::{
    compute_lia, evaluate_answers, Gate, LiaEngine, LiaFactor, LiaPreview, LiaResult,
    Recommendation, ScoreAxis, ScoreBreakdown, ScoreComponent, ScoringPolicy,
};
pub use service::{DecisionRequest, LiaAssessmentService, LiaServiceError, NewAssessment};
