use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentRepository};
use crate::routes::with_lia_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use compliance_hub::assessments::lia::{LiaAssessmentService, LiaEngine};
use compliance_hub::config::AppConfig;
use compliance_hub::error::AppError;
use compliance_hub::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let engine = LiaEngine::new(config.scoring)?;
    let lia_service = Arc::new(LiaAssessmentService::new(repository, engine));

    let app = with_lia_routes(lia_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        recommended_min_interest = config.scoring.recommended_min_interest,
        recommended_max_impact = config.scoring.recommended_max_impact,
        "legitimate interest assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
