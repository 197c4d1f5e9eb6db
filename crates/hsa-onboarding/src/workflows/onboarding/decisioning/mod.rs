mod config;
mod expiry;
mod matching;
pub(crate) mod normalize;
mod policy;
mod risk;

pub use config::DecisionConfig;
pub use expiry::ExpiryCheck;
pub use matching::{FieldMatchResult, MatchField};
pub use normalize::InvalidDateFormat;
pub use policy::Decision;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, ExtractedEmployerDocument, ExtractedIdentityDocument};
use policy::DocumentAvailability;

/// Stateless engine applying the matching rules and decision precedence to one
/// application. Every call is self-contained given its inputs and the injected
/// reference date, so concurrent use needs no synchronization.
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Evaluate one application against its extracted documents.
    ///
    /// Per-field problems (unparseable dates, missing document values) are
    /// absorbed into the match trace; the only fatal error is an applicant
    /// record that violates the caller contract by carrying an empty required
    /// field.
    pub fn decide(
        &self,
        applicant: &ApplicantRecord,
        id_document: Option<&ExtractedIdentityDocument>,
        employer_document: Option<&ExtractedEmployerDocument>,
        reference_date: NaiveDate,
    ) -> Result<DecisionOutcome, DecisionInputError> {
        guard_applicant(applicant)?;

        // A document the OCR collaborator flagged as failed is treated the
        // same as one that never arrived.
        let id_document = id_document.filter(|doc| !doc.processing_error);
        let employer_document = employer_document.filter(|doc| !doc.processing_error);
        let documents = DocumentAvailability {
            id_document: id_document.is_some(),
            employer_document: employer_document.is_some(),
        };

        let field_matches =
            matching::match_all(applicant, id_document, employer_document, &self.config);
        let expiry =
            id_document.map(|doc| expiry::check_raw(doc.expiry_date.as_deref(), reference_date));

        let risk_score = risk::risk_score(&field_matches, expiry.as_ref());
        let (decision, explanation) =
            policy::decide_outcome(&field_matches, expiry.as_ref(), &documents, &self.config);

        Ok(DecisionOutcome {
            decision,
            explanation,
            risk_score,
            field_matches,
            expiry,
        })
    }
}

/// Terminal artifact of one decision cycle: the outcome, a short human-readable
/// explanation, and the full trace the audit store persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub explanation: String,
    pub risk_score: f32,
    pub field_matches: Vec<FieldMatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<ExpiryCheck>,
}

/// Caller contract violation: the applicant record should have been validated
/// by intake before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionInputError {
    #[error("applicant record field '{0}' is empty")]
    MissingRequiredField(&'static str),
}

fn guard_applicant(applicant: &ApplicantRecord) -> Result<(), DecisionInputError> {
    let required = [
        ("full_name", applicant.full_name.as_str()),
        ("date_of_birth", applicant.date_of_birth.as_str()),
        ("street", applicant.address.street.as_str()),
        ("city", applicant.address.city.as_str()),
        ("state", applicant.address.state.as_str()),
        ("zip", applicant.address.zip.as_str()),
        (
            "social_security_number",
            applicant.social_security_number.as_str(),
        ),
        ("employer_name", applicant.employer_name.as_str()),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(DecisionInputError::MissingRequiredField(name));
        }
    }

    Ok(())
}
