use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Postal address split the way the enrollment form collects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Raw personal data captured by the enrollment form, prior to intake checks.
///
/// Dates travel as strings here; the intake guard and the decisioning
/// normalizer own parsing so unreadable values degrade into typed errors or
/// non-matches instead of panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub full_name: String,
    pub date_of_birth: String,
    pub address: MailingAddress,
    pub social_security_number: String,
    pub employer_name: String,
}

/// Intake-validated applicant data. Immutable for the life of a decision cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub application_id: ApplicationId,
    pub full_name: String,
    pub date_of_birth: String,
    pub address: MailingAddress,
    pub social_security_number: String,
    pub employer_name: String,
}

/// OCR output for a government identity document.
///
/// Produced by the external vision collaborator and treated as read-only input.
/// Every field is optional: the collaborator returns whatever it could read,
/// and sets `processing_error` when the upload was unreadable altogether.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIdentityDocument {
    #[serde(default)]
    pub document_kind: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_zip: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub issuing_authority: Option<String>,
    /// Per-field confidence reported by the vision collaborator, keyed by field name.
    #[serde(default)]
    pub field_confidence: BTreeMap<String, f32>,
    #[serde(default)]
    pub processing_error: bool,
}

/// OCR output for proof of HSA-eligible employment (pay stub, coverage letter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEmployerDocument {
    #[serde(default)]
    pub document_kind: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub employer_address: Option<String>,
    #[serde(default)]
    pub document_date: Option<String>,
    #[serde(default)]
    pub health_plan_type: Option<String>,
    #[serde(default)]
    pub field_confidence: BTreeMap<String, f32>,
    #[serde(default)]
    pub processing_error: bool,
}

/// High level status tracked throughout the onboarding workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingStatus {
    Submitted,
    DocumentsReceived,
    Approved,
    Rejected,
    UnderReview,
}

impl OnboardingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OnboardingStatus::Submitted => "submitted",
            OnboardingStatus::DocumentsReceived => "documents_received",
            OnboardingStatus::Approved => "approved",
            OnboardingStatus::Rejected => "rejected",
            OnboardingStatus::UnderReview => "under_review",
        }
    }
}
