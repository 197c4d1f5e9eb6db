use super::expiry::ExpiryCheck;
use super::matching::{FieldMatchResult, MatchField};

/// Relative weight of each check when aggregating failures into a risk score.
const EXPIRED_ID_WEIGHT: f32 = 1.0;

const fn field_weight(field: MatchField) -> f32 {
    match field {
        MatchField::FullName => 0.8,
        MatchField::DateOfBirth => 0.9,
        MatchField::Address => 0.3,
        MatchField::IdNumber => 0.5,
        MatchField::EmployerName => 0.4,
    }
}

/// Weighted aggregate of failed checks, normalized to [0, 1]. Informational
/// only: the precedence rules pick the outcome, the score rides along for
/// audit and review-queue triage.
pub(crate) fn risk_score(matches: &[FieldMatchResult], expiry: Option<&ExpiryCheck>) -> f32 {
    let mut total_risk = 0.0f32;
    let mut total_weight = 0.0f32;

    if let Some(check) = expiry {
        if !check.passed() {
            total_risk += EXPIRED_ID_WEIGHT;
            total_weight += EXPIRED_ID_WEIGHT;
        }
    }

    for result in matches.iter().filter(|result| !result.is_match) {
        let weight = field_weight(result.field);
        total_risk += (1.0 - result.confidence) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0.0;
    }

    (total_risk / total_weight).min(1.0)
}
