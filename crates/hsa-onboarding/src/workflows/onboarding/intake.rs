use chrono::NaiveDate;

use super::decisioning::normalize;
use super::domain::{ApplicantRecord, ApplicantSubmission, ApplicationId};

const MIN_TEXT_LEN: usize = 2;
const MAX_TEXT_LEN: usize = 100;
const MIN_AGE_YEARS: u32 = 18;
const MAX_AGE_YEARS: u32 = 120;

/// Validation errors raised by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be between {MIN_TEXT_LEN} and {MAX_TEXT_LEN} characters")]
    LengthOutOfRange { field: &'static str },
    #[error("{field} contains characters outside letters, spaces, and -.,'")]
    InvalidCharacters { field: &'static str },
    #[error("date of birth must use the YYYY-MM-DD format")]
    UnparseableDateOfBirth,
    #[error("date of birth cannot be in the future")]
    DateOfBirthInFuture,
    #[error("applicant age {age} is outside the accepted {MIN_AGE_YEARS}-{MAX_AGE_YEARS} range")]
    AgeOutOfRange { age: u32 },
    #[error("state must be a two-letter uppercase abbreviation")]
    InvalidState,
    #[error("ZIP code must be in NNNNN or NNNNN-NNNN format")]
    InvalidZipCode,
    #[error("social security number must contain exactly nine digits")]
    InvalidSsnLength,
    #[error("social security number uses a reserved or invalid pattern")]
    ReservedSsn,
}

/// Guard responsible for producing [`ApplicantRecord`] instances.
///
/// The engine downstream only compares content; presence and basic syntax are
/// settled here, once, at submission time.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a validated applicant record.
    ///
    /// `reference_date` anchors the age check so callers (and tests) control
    /// the clock.
    pub fn applicant_from_submission(
        &self,
        submission: ApplicantSubmission,
        reference_date: NaiveDate,
    ) -> Result<ApplicantRecord, IntakeViolation> {
        let full_name = validated_text("full_name", &submission.full_name)?;
        let employer_name = validated_text("employer_name", &submission.employer_name)?;

        let date_of_birth = submission.date_of_birth.trim();
        if date_of_birth.is_empty() {
            return Err(IntakeViolation::MissingField {
                field: "date_of_birth",
            });
        }
        let parsed_dob = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d")
            .map_err(|_| IntakeViolation::UnparseableDateOfBirth)?;
        let age = reference_date
            .years_since(parsed_dob)
            .ok_or(IntakeViolation::DateOfBirthInFuture)?;
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
            return Err(IntakeViolation::AgeOutOfRange { age });
        }

        let mut address = submission.address;
        address.street = required("street", &address.street)?;
        address.city = required("city", &address.city)?;
        address.state = address.state.trim().to_string();
        if address.state.len() != 2
            || !address.state.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(IntakeViolation::InvalidState);
        }
        address.zip = address.zip.trim().to_string();
        if !valid_zip(&address.zip) {
            return Err(IntakeViolation::InvalidZipCode);
        }

        let social_security_number = submission.social_security_number.trim().to_string();
        validate_ssn(&social_security_number)?;

        Ok(ApplicantRecord {
            application_id: ApplicationId("pending".to_string()),
            full_name,
            date_of_birth: date_of_birth.to_string(),
            address,
            social_security_number,
            employer_name,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeViolation::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn validated_text(field: &'static str, value: &str) -> Result<String, IntakeViolation> {
    let trimmed = required(field, value)?;
    if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&trimmed.chars().count()) {
        return Err(IntakeViolation::LengthOutOfRange { field });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '.' | ',' | '\''))
    {
        return Err(IntakeViolation::InvalidCharacters { field });
    }
    Ok(trimmed)
}

fn valid_zip(zip: &str) -> bool {
    let bytes = zip.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

fn validate_ssn(raw: &str) -> Result<(), IntakeViolation> {
    let digits = normalize::id_number(raw);
    if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntakeViolation::InvalidSsnLength);
    }

    // Area 000, group 00, and serial 0000 are never issued.
    if digits.starts_with("000") || &digits[3..5] == "00" || &digits[5..] == "0000" {
        return Err(IntakeViolation::ReservedSsn);
    }

    Ok(())
}
