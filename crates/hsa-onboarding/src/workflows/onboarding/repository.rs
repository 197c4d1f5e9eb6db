use serde::{Deserialize, Serialize};

use super::decisioning::DecisionOutcome;
use super::domain::{
    ApplicantRecord, ApplicationId, ExtractedEmployerDocument, ExtractedIdentityDocument,
    OnboardingStatus,
};

/// Repository record containing the applicant, attached extractions, status,
/// and the latest decision outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub applicant: ApplicantRecord,
    pub status: OnboardingStatus,
    pub id_document: Option<ExtractedIdentityDocument>,
    pub employer_document: Option<ExtractedEmployerDocument>,
    pub outcome: Option<DecisionOutcome>,
}

impl ApplicationRecord {
    pub fn decision_rationale(&self) -> String {
        match &self.outcome {
            Some(outcome) => outcome.explanation.clone(),
            None => "pending decision".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.applicant.application_id.clone(),
            status: self.status.label(),
            decision: self
                .outcome
                .as_ref()
                .map(|outcome| outcome.decision.label()),
            decision_rationale: self.decision_rationale(),
            risk_score: self.outcome.as_ref().map(|outcome| outcome.risk_score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<&'static str>,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f32>,
}
