use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::LiaAnswers;
use super::draft::LiaDraftAnswers;
use super::error::LiaError;
use super::repository::{AssessmentId, AssessmentRepository, RepositoryError};
use super::service::{DecisionRequest, LiaAssessmentService, LiaServiceError, NewAssessment};

/// Router builder exposing scoring and assessment endpoints.
pub fn lia_router<R>(service: Arc<LiaAssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/lia/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/lia/preview", post(preview_handler::<R>))
        .route("/api/v1/lia/assessments", post(create_handler::<R>))
        .route(
            "/api/v1/lia/assessments/:assessment_id",
            get(fetch_handler::<R>),
        )
        .route(
            "/api/v1/lia/assessments/:assessment_id/decision",
            post(decision_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<LiaAssessmentService<R>>>,
    Json(answers): Json<LiaAnswers>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.evaluate(&answers) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<LiaAssessmentService<R>>>,
    Json(answers): Json<LiaDraftAnswers>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.preview_answers(&answers) {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<LiaAssessmentService<R>>>,
    Json(request): Json<NewAssessment>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.create(request) {
        Ok(assessment) => (StatusCode::CREATED, Json(assessment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<LiaAssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(assessment) => (StatusCode::OK, Json(assessment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<LiaAssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.record_decision(&AssessmentId(assessment_id), request) {
        Ok(assessment) => (StatusCode::OK, Json(assessment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LiaServiceError) -> Response {
    let status = match &error {
        LiaServiceError::Assessment(_)
        | LiaServiceError::MissingProcessingActivity
        | LiaServiceError::MissingDecisionOwner => StatusCode::UNPROCESSABLE_ENTITY,
        LiaServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LiaServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LiaServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = match &error {
        LiaServiceError::Assessment(LiaError::InvalidInput { field, .. }) => json!({
            "error": error.to_string(),
            "field": field,
        }),
        _ => json!({ "error": error.to_string() }),
    };

    (status, Json(payload)).into_response()
}
