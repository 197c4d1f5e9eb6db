use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::onboarding::audit::{AuditEntry, AuditError, AuditRecorder};
use crate::workflows::onboarding::decisioning::{DecisionConfig, DecisionEngine};
use crate::workflows::onboarding::domain::{
    ApplicantRecord, ApplicantSubmission, ApplicationId, ExtractedEmployerDocument,
    ExtractedIdentityDocument, MailingAddress,
};
use crate::workflows::onboarding::intake::IntakeGuard;
use crate::workflows::onboarding::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError,
};
use crate::workflows::onboarding::{onboarding_router, OnboardingService};

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

pub(super) fn address() -> MailingAddress {
    MailingAddress {
        street: "123 Main St.".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62704".to_string(),
    }
}

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission {
        full_name: "Jane A. Doe".to_string(),
        date_of_birth: "1990-05-01".to_string(),
        address: address(),
        social_security_number: "123-45-6789".to_string(),
        employer_name: "Acme Corporation".to_string(),
    }
}

pub(super) fn applicant(suffix: &str) -> ApplicantRecord {
    ApplicantRecord {
        application_id: ApplicationId(format!("hsa-{suffix}")),
        full_name: "Jane A. Doe".to_string(),
        date_of_birth: "1990-05-01".to_string(),
        address: address(),
        social_security_number: "123-45-6789".to_string(),
        employer_name: "Acme Corporation".to_string(),
    }
}

/// ID extraction agreeing with [`applicant`] modulo OCR spelling: abbreviated
/// street, dropped middle initial, separator-free id number.
pub(super) fn id_document() -> ExtractedIdentityDocument {
    ExtractedIdentityDocument {
        document_kind: Some("driver's license".to_string()),
        id_number: Some("123456789".to_string()),
        full_name: Some("Jane Doe".to_string()),
        date_of_birth: Some("1990-05-01".to_string()),
        address_street: Some("123 Main Street".to_string()),
        address_city: Some("Springfield".to_string()),
        address_state: Some("IL".to_string()),
        address_zip: Some("62704".to_string()),
        issue_date: Some("2022-01-01".to_string()),
        expiry_date: Some("2030-01-01".to_string()),
        issuing_authority: Some("Illinois Secretary of State".to_string()),
        ..ExtractedIdentityDocument::default()
    }
}

pub(super) fn employer_document() -> ExtractedEmployerDocument {
    ExtractedEmployerDocument {
        document_kind: Some("pay stub".to_string()),
        employee_name: Some("Jane Doe".to_string()),
        employer_name: Some("Acme Corp.".to_string()),
        employer_address: Some("1 Industrial Way, Springfield, IL".to_string()),
        document_date: Some("2023-12-15".to_string()),
        health_plan_type: Some("HDHP".to_string()),
        ..ExtractedEmployerDocument::default()
    }
}

pub(super) fn expired_id_document() -> ExtractedIdentityDocument {
    ExtractedIdentityDocument {
        expiry_date: Some("2023-01-01".to_string()),
        ..id_document()
    }
}

pub(super) fn failed_id_document() -> ExtractedIdentityDocument {
    ExtractedIdentityDocument {
        processing_error: true,
        ..id_document()
    }
}

pub(super) fn decision_config() -> DecisionConfig {
    DecisionConfig::default()
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(decision_config())
}

pub(super) fn guard() -> IntakeGuard {
    IntakeGuard
}

pub(super) fn build_service() -> (
    OnboardingService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = OnboardingService::new(repository.clone(), audit.clone(), decision_config());
    (service, repository, audit)
}

pub(super) fn onboarding_router_with_service(
    service: OnboardingService<MemoryRepository, MemoryAudit>,
) -> axum::Router {
    onboarding_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.applicant.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.applicant.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.applicant.application_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditRecorder for MemoryAudit {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
