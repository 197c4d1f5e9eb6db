use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decisioning::{Decision, DecisionOutcome, ExpiryCheck, FieldMatchResult};
use super::domain::ApplicationId;

/// Recorder abstraction so decision traces can be persisted by an external
/// store, one record per application per decision cycle.
pub trait AuditRecorder: Send + Sync {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Everything an auditor needs to reconstruct a decision: the outcome, the
/// full match trace, the expiry check, and which engine build produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub application_id: ApplicationId,
    pub decision: Decision,
    pub risk_score: f32,
    pub explanation: String,
    pub field_matches: Vec<FieldMatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<ExpiryCheck>,
    pub decided_at: DateTime<Utc>,
    pub engine_version: String,
}

impl AuditEntry {
    pub fn from_outcome(
        application_id: ApplicationId,
        outcome: &DecisionOutcome,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            application_id,
            decision: outcome.decision,
            risk_score: outcome.risk_score,
            explanation: outcome.explanation.clone(),
            field_matches: outcome.field_matches.clone(),
            expiry: outcome.expiry.clone(),
            decided_at,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Audit sink error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
