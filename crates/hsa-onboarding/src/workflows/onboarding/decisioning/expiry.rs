use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize;

/// Result of validating the ID's expiry against a caller-supplied reference
/// date. The reference date is always injected, never read from the system
/// clock, so the check stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub reference_date: NaiveDate,
    pub expired: bool,
    pub days_overdue: i64,
    /// Set when the expiry date was missing or unreadable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ExpiryCheck {
    /// An ID expiring exactly on the reference date is still valid.
    pub fn of(expiry_date: NaiveDate, reference_date: NaiveDate) -> Self {
        let expired = expiry_date < reference_date;
        let days_overdue = if expired {
            (reference_date - expiry_date).num_days()
        } else {
            0
        };

        Self {
            expiry_date: Some(expiry_date),
            reference_date,
            expired,
            days_overdue,
            reason: None,
        }
    }

    fn unreadable(reference_date: NaiveDate, reason: String) -> Self {
        Self {
            expiry_date: None,
            reference_date,
            expired: false,
            days_overdue: 0,
            reason: Some(reason),
        }
    }

    /// True only when a readable expiry date was on or after the reference date.
    pub fn passed(&self) -> bool {
        self.expiry_date.is_some() && !self.expired
    }
}

/// Evaluate the raw expiry field as the OCR collaborator delivered it.
pub(crate) fn check_raw(raw: Option<&str>, reference_date: NaiveDate) -> ExpiryCheck {
    match raw {
        None => ExpiryCheck::unreadable(
            reference_date,
            "no expiry date found on ID".to_string(),
        ),
        Some(value) => match normalize::date(value) {
            Ok(expiry_date) => ExpiryCheck::of(expiry_date, reference_date),
            Err(err) => ExpiryCheck::unreadable(
                reference_date,
                format!("unreadable expiry date: {err}"),
            ),
        },
    }
}
