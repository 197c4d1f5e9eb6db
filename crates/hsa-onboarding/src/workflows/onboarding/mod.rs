//! HSA application intake, document matching, and decisioning.
//!
//! The flow runs leaf to root: the intake guard validates what the applicant
//! typed, the OCR collaborator's extractions get attached as-is, and the
//! decision engine compares the two sides field by field before the precedence
//! rules collapse everything into approve, reject, or manual review. The
//! repository and audit recorder are traits so storage stays external.

pub mod audit;
pub(crate) mod decisioning;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{AuditEntry, AuditError, AuditRecorder};
pub use decisioning::{
    Decision, DecisionConfig, DecisionEngine, DecisionInputError, DecisionOutcome, ExpiryCheck,
    FieldMatchResult, InvalidDateFormat, MatchField,
};
pub use domain::{
    ApplicantRecord, ApplicantSubmission, ApplicationId, ExtractedEmployerDocument,
    ExtractedIdentityDocument, MailingAddress, OnboardingStatus,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError,
};
pub use router::{onboarding_router, DecisionRequest, DocumentAttachment};
pub use service::{OnboardingService, OnboardingServiceError};
