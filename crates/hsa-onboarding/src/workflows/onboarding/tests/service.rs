use std::sync::Arc;

use super::common::*;
use crate::workflows::onboarding::decisioning::Decision;
use crate::workflows::onboarding::domain::{ApplicationId, OnboardingStatus};
use crate::workflows::onboarding::intake::IntakeViolation;
use crate::workflows::onboarding::repository::{ApplicationRepository, RepositoryError};
use crate::workflows::onboarding::service::{OnboardingService, OnboardingServiceError};

#[test]
fn submit_assigns_an_application_id() {
    let (service, repository, _) = build_service();

    let record = service.submit(submission()).expect("submission succeeds");

    assert_ne!(record.applicant.application_id.0, "pending");
    assert!(record.applicant.application_id.0.starts_with("hsa-"));
    assert_eq!(record.status, OnboardingStatus::Submitted);
    assert!(repository
        .fetch(&record.applicant.application_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn submit_propagates_intake_violations() {
    let (service, _, _) = build_service();

    let mut bad = submission();
    bad.address.zip = "nope".to_string();

    match service.submit(bad) {
        Err(OnboardingServiceError::Intake(IntakeViolation::InvalidZipCode)) => {}
        other => panic!("expected intake violation, got {other:?}"),
    }
}

#[test]
fn attach_documents_moves_status_forward() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    let updated = service
        .attach_documents(
            &record.applicant.application_id,
            Some(id_document()),
            Some(employer_document()),
        )
        .expect("attachment succeeds");

    assert_eq!(updated.status, OnboardingStatus::DocumentsReceived);
    assert!(updated.id_document.is_some());
    assert!(updated.employer_document.is_some());
}

#[test]
fn attach_documents_keeps_existing_slots_when_omitted() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    let id = record.applicant.application_id.clone();

    service
        .attach_documents(&id, Some(id_document()), None)
        .expect("first attachment succeeds");
    let updated = service
        .attach_documents(&id, None, Some(employer_document()))
        .expect("second attachment succeeds");

    assert!(updated.id_document.is_some());
    assert!(updated.employer_document.is_some());
}

#[test]
fn decide_persists_outcome_status_and_audit_entry() {
    let (service, repository, audit) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    let id = record.applicant.application_id.clone();

    service
        .attach_documents(&id, Some(id_document()), Some(employer_document()))
        .expect("attachment succeeds");
    let outcome = service
        .decide(&id, Some(reference_date()))
        .expect("decision succeeds");

    assert_eq!(outcome.decision, Decision::Approve);

    let stored = repository
        .fetch(&id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, OnboardingStatus::Approved);
    assert_eq!(stored.outcome.as_ref(), Some(&outcome));

    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].application_id, id);
    assert_eq!(entries[0].decision, Decision::Approve);
    assert_eq!(entries[0].field_matches, outcome.field_matches);
    assert_eq!(entries[0].engine_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn decide_with_expired_id_marks_record_rejected() {
    let (service, repository, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    let id = record.applicant.application_id.clone();

    service
        .attach_documents(&id, Some(expired_id_document()), Some(employer_document()))
        .expect("attachment succeeds");
    let outcome = service
        .decide(&id, Some(reference_date()))
        .expect("decision succeeds");

    assert_eq!(outcome.decision, Decision::Reject);
    let stored = repository
        .fetch(&id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, OnboardingStatus::Rejected);
}

#[test]
fn decide_without_documents_lands_in_manual_review() {
    let (service, repository, audit) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    let id = record.applicant.application_id.clone();

    let outcome = service
        .decide(&id, Some(reference_date()))
        .expect("decision succeeds");

    assert_eq!(outcome.decision, Decision::ManualReview);
    let stored = repository
        .fetch(&id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, OnboardingStatus::UnderReview);
    assert_eq!(audit.entries().len(), 1);
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&ApplicationId("missing".to_string())) {
        Err(OnboardingServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn repository_failures_surface_as_service_errors() {
    let service = OnboardingService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryAudit::default()),
        decision_config(),
    );

    match service.submit(submission()) {
        Err(OnboardingServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn decision_rationale_tracks_outcome() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    let id = record.applicant.application_id.clone();
    assert_eq!(record.decision_rationale(), "pending decision");

    service
        .attach_documents(&id, Some(id_document()), Some(employer_document()))
        .expect("attachment succeeds");
    service
        .decide(&id, Some(reference_date()))
        .expect("decision succeeds");

    let decided = service.get(&id).expect("record present");
    assert_eq!(decided.decision_rationale(), "All data matches; ID valid");

    let view = decided.status_view();
    assert_eq!(view.status, OnboardingStatus::Approved.label());
    assert_eq!(view.decision, Some(Decision::Approve.label()));
    assert_eq!(view.risk_score, Some(0.0));
}
