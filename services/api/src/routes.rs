use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use hsa_onboarding::error::AppError;
use hsa_onboarding::workflows::onboarding::{
    onboarding_router, ApplicantSubmission, ApplicationRepository, AuditRecorder,
    DecisionConfig, DecisionEngine, DecisionOutcome, ExtractedEmployerDocument,
    ExtractedIdentityDocument, IntakeGuard, OnboardingService,
};

pub(crate) fn with_onboarding_routes<R, A>(
    service: Arc<OnboardingService<R, A>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    onboarding_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/onboarding/decisions",
            axum::routing::post(adhoc_decision_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// One-shot evaluation of an inline payload, for callers that manage their own
/// application storage and only want the decision.
#[derive(Debug, Deserialize)]
pub(crate) struct AdHocDecisionRequest {
    pub(crate) applicant: ApplicantSubmission,
    #[serde(default)]
    pub(crate) government_id: Option<ExtractedIdentityDocument>,
    #[serde(default)]
    pub(crate) employer_document: Option<ExtractedEmployerDocument>,
    #[serde(default)]
    pub(crate) reference_date: Option<NaiveDate>,
}

pub(crate) async fn adhoc_decision_endpoint(
    Json(payload): Json<AdHocDecisionRequest>,
) -> Result<Json<DecisionOutcome>, AppError> {
    let AdHocDecisionRequest {
        applicant,
        government_id,
        employer_document,
        reference_date,
    } = payload;

    let today = Local::now().date_naive();
    let reference_date = reference_date.unwrap_or(today);

    let record = IntakeGuard.applicant_from_submission(applicant, today)?;
    let engine = DecisionEngine::new(DecisionConfig::default());
    let outcome = engine.decide(
        &record,
        government_id.as_ref(),
        employer_document.as_ref(),
        reference_date,
    )?;

    Ok(Json(outcome))
}
