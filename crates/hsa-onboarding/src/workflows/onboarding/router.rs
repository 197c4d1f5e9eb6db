use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::audit::AuditRecorder;
use super::domain::{
    ApplicantSubmission, ApplicationId, ExtractedEmployerDocument, ExtractedIdentityDocument,
};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{OnboardingService, OnboardingServiceError};

/// Router builder exposing HTTP endpoints for intake, document attachment,
/// and decisioning.
pub fn onboarding_router<R, A>(service: Arc<OnboardingService<R, A>>) -> Router
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/applications", post(submit_handler::<R, A>))
        .route(
            "/api/v1/onboarding/applications/:application_id",
            get(status_handler::<R, A>),
        )
        .route(
            "/api/v1/onboarding/applications/:application_id/documents",
            post(documents_handler::<R, A>),
        )
        .route(
            "/api/v1/onboarding/applications/:application_id/decision",
            post(decision_handler::<R, A>),
        )
        .with_state(service)
}

/// Extraction payloads delivered by the OCR collaborator, either or both slots.
#[derive(Debug, Deserialize)]
pub struct DocumentAttachment {
    #[serde(default)]
    pub government_id: Option<ExtractedIdentityDocument>,
    #[serde(default)]
    pub employer_document: Option<ExtractedEmployerDocument>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    /// Overrides "today" for the expiry check; keeps decisions reproducible.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<OnboardingService<R, A>>>,
    axum::Json(submission): axum::Json<ApplicantSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn documents_handler<R, A>(
    State(service): State<Arc<OnboardingService<R, A>>>,
    Path(application_id): Path<String>,
    axum::Json(attachment): axum::Json<DocumentAttachment>,
) -> Response
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    let id = ApplicationId(application_id);
    match service.attach_documents(&id, attachment.government_id, attachment.employer_document) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<R, A>(
    State(service): State<Arc<OnboardingService<R, A>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    let id = ApplicationId(application_id);
    match service.decide(&id, request.reference_date) {
        Ok(outcome) => {
            let payload = json!({
                "application_id": id.0,
                "outcome": outcome,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, A>(
    State(service): State<Arc<OnboardingService<R, A>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: OnboardingServiceError) -> Response {
    let status = match &error {
        OnboardingServiceError::Intake(_) | OnboardingServiceError::Decision(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        OnboardingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        OnboardingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OnboardingServiceError::Repository(RepositoryError::Unavailable(_))
        | OnboardingServiceError::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
