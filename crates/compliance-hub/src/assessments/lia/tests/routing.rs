use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessments::lia::draft::LiaDraftAnswers;
use crate::assessments::lia::repository::DecisionOutcome;
use crate::assessments::lia::router::{
    create_handler, decision_handler, evaluate_handler, fetch_handler, lia_router,
    preview_handler,
};
use crate::assessments::lia::scoring::LiaEngine;
use crate::assessments::lia::service::{DecisionRequest, LiaAssessmentService};

fn post_json(uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("body serializes"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn evaluate_handler_returns_scores() {
    let (service, _) = build_service();

    let response =
        evaluate_handler::<MemoryRepository>(State(Arc::new(service)), Json(answers(&minimal_input())))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gate"], json!("scored"));
    assert_eq!(payload["interestScore"], json!(0));
    assert_eq!(payload["impactScore"], json!(50));
    assert_eq!(payload["recommendation"], json!("not-recommended"));
}

#[tokio::test]
async fn evaluate_handler_names_invalid_field() {
    let (service, _) = build_service();
    let mut raw = answers(&moderate_input());
    raw.data_obtainment = "scraped".to_string();

    let response = evaluate_handler::<MemoryRepository>(State(Arc::new(service)), Json(raw)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("dataObtainment"));
}

#[tokio::test]
async fn preview_handler_reports_missing_fields() {
    let (service, _) = build_service();

    let response =
        preview_handler::<MemoryRepository>(State(Arc::new(service)), Json(LiaDraftAnswers::default()))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("incomplete"));
    assert_eq!(payload["missing"].as_array().map(Vec::len), Some(7));
}

#[tokio::test]
async fn create_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(LiaAssessmentService::new(
        Arc::new(ConflictRepository),
        LiaEngine::default(),
    ));

    let response =
        create_handler::<ConflictRepository>(State(service), Json(new_assessment(&strong_input())))
            .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(LiaAssessmentService::new(
        Arc::new(UnavailableRepository),
        LiaEngine::default(),
    ));

    let response = create_handler::<UnavailableRepository>(
        State(service),
        Json(new_assessment(&strong_input())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn fetch_handler_returns_not_found() {
    let (service, _) = build_service();

    let response = fetch_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Path("lia-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assessment_routes_create_then_record_decision() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/lia/assessments",
            serde_json::to_value(new_assessment(&minimal_input())).expect("serializes"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let id = created["id"].as_str().expect("id present").to_string();
    assert_eq!(created["status"], json!("awaiting-decision"));

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/lia/assessments/{id}/decision"),
            json!({
                "outcome": "proceed",
                "notes": "Mitigations agreed with works council",
                "decidedBy": "dpo@example.org",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let decided = read_json_body(response).await;
    assert_eq!(decided["status"], json!("overridden"));
    assert_eq!(decided["recommendation"], json!("not-recommended"));

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/lia/assessments/{id}"))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["finalDecision"]["decidedBy"], json!("dpo@example.org"));
}

#[tokio::test]
async fn evaluate_route_accepts_wire_payloads() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/evaluate",
            json!({
                "alternativeLegalBasis": "contract",
                "legalException": true,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gate"], json!("blocked"));
    assert_eq!(payload["interestScore"], json!(0));
    assert_eq!(payload["impactScore"], json!(100));
}

#[tokio::test]
async fn evaluate_route_auto_approves_before_checking_other_selects() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/evaluate",
            json!({
                "alternativeLegalBasis": "none",
                "legalException": true,
                "importance": "",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gate"], json!("auto-approved"));
    assert_eq!(payload["recommendation"], json!("recommended"));
}

#[tokio::test]
async fn evaluate_route_validates_selects_when_scoring() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/evaluate",
            json!({ "alternativeLegalBasis": "none" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("importance"));
}

#[tokio::test]
async fn evaluate_route_rejects_unknown_legal_basis() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/evaluate",
            json!({ "alternativeLegalBasis": " consent " }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("alternativeLegalBasis"));
}

#[tokio::test]
async fn preview_route_treats_empty_select_as_unanswered() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/preview",
            json!({ "alternativeLegalBasis": "none", "importance": "" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("incomplete"));
    assert_eq!(payload["missing"][0], json!("importance"));
}

#[tokio::test]
async fn preview_route_names_unknown_select_value() {
    let (service, _) = build_service();
    let router = lia_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/lia/preview",
            json!({ "alternativeLegalBasis": "none", "importance": "mission-critical" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("importance"));
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("mission-critical")));
}

#[tokio::test]
async fn decision_route_reports_concurrent_write_as_conflict() {
    let service = Arc::new(LiaAssessmentService::new(
        Arc::new(RacingRepository::default()),
        LiaEngine::default(),
    ));
    let assessment = service
        .create(new_assessment(&moderate_input()))
        .expect("assessment created");

    let response = decision_handler::<RacingRepository>(
        State(service),
        Path(assessment.id.0.clone()),
        Json(DecisionRequest {
            outcome: DecisionOutcome::Proceed,
            notes: String::new(),
            decided_by: "dpo@example.org".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
