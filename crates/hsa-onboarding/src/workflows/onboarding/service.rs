use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::info;

use super::audit::{AuditEntry, AuditError, AuditRecorder};
use super::decisioning::{Decision, DecisionConfig, DecisionEngine, DecisionInputError, DecisionOutcome};
use super::domain::{
    ApplicantSubmission, ApplicationId, ExtractedEmployerDocument, ExtractedIdentityDocument,
    OnboardingStatus,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};

/// Service composing the intake guard, repository, decision engine, and audit
/// recorder into the onboarding workflow.
pub struct OnboardingService<R, A> {
    guard: IntakeGuard,
    repository: Arc<R>,
    audit: Arc<A>,
    engine: Arc<DecisionEngine>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("hsa-{id:06}"))
}

impl<R, A> OnboardingService<R, A>
where
    R: ApplicationRepository + 'static,
    A: AuditRecorder + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<A>, config: DecisionConfig) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            audit,
            engine: Arc::new(DecisionEngine::new(config)),
        }
    }

    /// Submit a new application, returning the repository-backed record.
    pub fn submit(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<ApplicationRecord, OnboardingServiceError> {
        let today = Local::now().date_naive();
        let mut applicant = self.guard.applicant_from_submission(submission, today)?;
        applicant.application_id = next_application_id();

        let record = ApplicationRecord {
            applicant,
            status: OnboardingStatus::Submitted,
            id_document: None,
            employer_document: None,
            outcome: None,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.applicant.application_id.0,
            "application submitted"
        );
        Ok(stored)
    }

    /// Attach extraction results delivered by the OCR collaborator. Passing
    /// `None` for a slot leaves any previously attached document in place.
    pub fn attach_documents(
        &self,
        application_id: &ApplicationId,
        id_document: Option<ExtractedIdentityDocument>,
        employer_document: Option<ExtractedEmployerDocument>,
    ) -> Result<ApplicationRecord, OnboardingServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        if let Some(doc) = id_document {
            record.id_document = Some(doc);
        }
        if let Some(doc) = employer_document {
            record.employer_document = Some(doc);
        }
        if record.outcome.is_none() {
            record.status = OnboardingStatus::DocumentsReceived;
        }

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Evaluate a pending application, persist the outcome, and append an
    /// audit entry. `reference_date` defaults to today when not supplied.
    pub fn decide(
        &self,
        application_id: &ApplicationId,
        reference_date: Option<NaiveDate>,
    ) -> Result<DecisionOutcome, OnboardingServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let reference_date = reference_date.unwrap_or_else(|| Local::now().date_naive());
        let outcome = self.engine.decide(
            &record.applicant,
            record.id_document.as_ref(),
            record.employer_document.as_ref(),
            reference_date,
        )?;

        record.status = match outcome.decision {
            Decision::Approve => OnboardingStatus::Approved,
            Decision::Reject => OnboardingStatus::Rejected,
            Decision::ManualReview => OnboardingStatus::UnderReview,
        };
        record.outcome = Some(outcome.clone());
        self.repository.update(record)?;

        self.audit.record(AuditEntry::from_outcome(
            application_id.clone(),
            &outcome,
            Utc::now(),
        ))?;

        info!(
            application_id = %application_id.0,
            decision = outcome.decision.label(),
            risk_score = outcome.risk_score,
            "application adjudicated"
        );
        Ok(outcome)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, OnboardingServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Decision(#[from] DecisionInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
