use serde::{Deserialize, Serialize};

use super::config::DecisionConfig;
use super::expiry::ExpiryCheck;
use super::matching::FieldMatchResult;

/// Adjudication outcome for a screened application. Always exactly one of the
/// three values; the explanation travels on [`super::DecisionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
    ManualReview,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
            Decision::ManualReview => "manual_review",
        }
    }
}

pub(crate) struct DocumentAvailability {
    pub id_document: bool,
    pub employer_document: bool,
}

impl DocumentAvailability {
    fn all_present(&self) -> bool {
        self.id_document && self.employer_document
    }
}

/// Strict precedence: expired ID rejects, unreadable documents force review,
/// any remaining failed check forces review, and only a fully clean slate
/// approves.
pub(crate) fn decide_outcome(
    matches: &[FieldMatchResult],
    expiry: Option<&ExpiryCheck>,
    documents: &DocumentAvailability,
    config: &DecisionConfig,
) -> (Decision, String) {
    if config.expired_id_auto_reject {
        if let Some(check) = expiry {
            if check.expired {
                let date = check
                    .expiry_date
                    .map(|date| date.to_string())
                    .unwrap_or_default();
                return (Decision::Reject, format!("ID expired on {date}"));
            }
        }
    }

    if !documents.all_present() {
        return (
            Decision::ManualReview,
            "Document unreadable or missing; manual verification required".to_string(),
        );
    }

    let mut reasons: Vec<String> = Vec::new();
    match expiry {
        // Reachable only with auto-reject disabled; an expired ID still never approves.
        Some(check) if check.expired => {
            let date = check
                .expiry_date
                .map(|date| date.to_string())
                .unwrap_or_default();
            reasons.push(format!("ID expired on {date}"));
        }
        Some(check) if !check.passed() => {
            let detail = check
                .reason
                .clone()
                .unwrap_or_else(|| "expiry check failed".to_string());
            reasons.push(format!("ID expiry could not be verified: {detail}"));
        }
        None => reasons.push("ID expiry could not be verified".to_string()),
        Some(_) => {}
    }
    reasons.extend(
        matches
            .iter()
            .filter(|result| !result.is_match)
            .map(|result| result.field.mismatch_phrase().to_string()),
    );

    if reasons.is_empty() {
        (Decision::Approve, "All data matches; ID valid".to_string())
    } else {
        (Decision::ManualReview, reasons.join("; "))
    }
}
