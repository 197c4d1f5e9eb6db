use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicantRecord, ExtractedEmployerDocument, ExtractedIdentityDocument, MailingAddress,
};
use super::config::DecisionConfig;
use super::normalize;

/// Fields the engine always compares, in reporting order. Every decision cycle
/// yields exactly one [`FieldMatchResult`] per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    FullName,
    DateOfBirth,
    Address,
    IdNumber,
    EmployerName,
}

impl MatchField {
    pub const ALL: [MatchField; 5] = [
        MatchField::FullName,
        MatchField::DateOfBirth,
        MatchField::Address,
        MatchField::IdNumber,
        MatchField::EmployerName,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MatchField::FullName => "full_name",
            MatchField::DateOfBirth => "date_of_birth",
            MatchField::Address => "address",
            MatchField::IdNumber => "id_number",
            MatchField::EmployerName => "employer_name",
        }
    }

    /// Phrase used when this field fails and the outcome explanation lists it.
    pub(crate) const fn mismatch_phrase(self) -> &'static str {
        match self {
            MatchField::FullName => "Name mismatch between ID and application",
            MatchField::DateOfBirth => "Date of birth mismatch between ID and application",
            MatchField::Address => "Address mismatch between ID and application",
            MatchField::IdNumber => "ID number mismatch between ID and application",
            MatchField::EmployerName => {
                "Employer mismatch between employer document and application"
            }
        }
    }
}

/// One comparison between an applicant-entered value and a document value.
/// Computed fresh per decision cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatchResult {
    pub field: MatchField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_value: Option<String>,
    pub is_match: bool,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FieldMatchResult {
    fn matched(field: MatchField, app: &str, doc: &str, confidence: f32) -> Self {
        Self {
            field,
            application_value: Some(app.to_string()),
            document_value: Some(doc.to_string()),
            is_match: true,
            confidence,
            reason: None,
        }
    }

    fn matched_with_reason(
        field: MatchField,
        app: &str,
        doc: &str,
        confidence: f32,
        reason: String,
    ) -> Self {
        Self {
            reason: Some(reason),
            ..Self::matched(field, app, doc, confidence)
        }
    }

    fn mismatch(field: MatchField, app: &str, doc: &str, confidence: f32, reason: String) -> Self {
        Self {
            field,
            application_value: Some(app.to_string()),
            document_value: Some(doc.to_string()),
            is_match: false,
            confidence,
            reason: Some(reason),
        }
    }

    fn value_missing(field: MatchField, app: &str) -> Self {
        Self {
            field,
            application_value: Some(app.to_string()),
            document_value: None,
            is_match: false,
            confidence: 0.0,
            reason: Some("not present on document".to_string()),
        }
    }

    pub(crate) fn document_unavailable(field: MatchField, app: &str) -> Self {
        Self {
            field,
            application_value: Some(app.to_string()),
            document_value: None,
            is_match: false,
            confidence: 0.0,
            reason: Some("document unavailable".to_string()),
        }
    }
}

/// Compare every required field, producing one result per [`MatchField::ALL`]
/// entry. Fields whose source document is absent come back as unavailable
/// rather than being skipped, so the trace is always complete.
pub(crate) fn match_all(
    applicant: &ApplicantRecord,
    id_document: Option<&ExtractedIdentityDocument>,
    employer_document: Option<&ExtractedEmployerDocument>,
    config: &DecisionConfig,
) -> Vec<FieldMatchResult> {
    MatchField::ALL
        .iter()
        .map(|field| match field {
            MatchField::FullName => match id_document {
                Some(doc) => match_name(&applicant.full_name, doc.full_name.as_deref(), config),
                None => FieldMatchResult::document_unavailable(*field, &applicant.full_name),
            },
            MatchField::DateOfBirth => match id_document {
                Some(doc) => {
                    match_date(&applicant.date_of_birth, doc.date_of_birth.as_deref())
                }
                None => FieldMatchResult::document_unavailable(*field, &applicant.date_of_birth),
            },
            MatchField::Address => match id_document {
                Some(doc) => match_address(&applicant.address, doc),
                None => FieldMatchResult::document_unavailable(
                    *field,
                    &display_address(&applicant.address),
                ),
            },
            MatchField::IdNumber => match id_document {
                Some(doc) => match_id_number(
                    &applicant.social_security_number,
                    doc.id_number.as_deref(),
                ),
                None => FieldMatchResult::document_unavailable(
                    *field,
                    &applicant.social_security_number,
                ),
            },
            MatchField::EmployerName => match employer_document {
                Some(doc) => {
                    match_employer(&applicant.employer_name, doc.employer_name.as_deref(), config)
                }
                None => FieldMatchResult::document_unavailable(*field, &applicant.employer_name),
            },
        })
        .collect()
}

/// Names tolerate a bounded amount of OCR noise: exact match after folding,
/// then token-subset (middle name or initial dropped), then an edit-distance
/// budget scaled to the name length.
fn match_name(app: &str, doc: Option<&str>, config: &DecisionConfig) -> FieldMatchResult {
    let field = MatchField::FullName;
    let Some(doc) = doc else {
        return FieldMatchResult::value_missing(field, app);
    };

    let app_norm = normalize::name(app);
    let doc_norm = normalize::name(doc);
    if app_norm.is_empty() || doc_norm.is_empty() {
        return FieldMatchResult::mismatch(
            field,
            app,
            doc,
            0.0,
            "normalization failure".to_string(),
        );
    }

    if app_norm == doc_norm {
        return FieldMatchResult::matched(field, app, doc, 1.0);
    }

    if token_subset(&app_norm, &doc_norm) {
        return FieldMatchResult::matched_with_reason(
            field,
            app,
            doc,
            0.85,
            "middle name or initial variation".to_string(),
        );
    }

    let longer = app_norm.chars().count().max(doc_norm.chars().count());
    let distance = levenshtein(&app_norm, &doc_norm);
    let allowed = config.max_name_edits(longer);
    let confidence = (1.0 - distance as f32 / longer as f32).max(0.0);

    if distance <= allowed {
        FieldMatchResult::matched_with_reason(
            field,
            app,
            doc,
            confidence,
            format!("within OCR noise tolerance (edit distance {distance})"),
        )
    } else {
        FieldMatchResult::mismatch(
            field,
            app,
            doc,
            confidence,
            format!("edit distance {distance} exceeds tolerance of {allowed}"),
        )
    }
}

/// Dates never tolerate noise: both sides must parse and be equal.
fn match_date(app: &str, doc: Option<&str>) -> FieldMatchResult {
    let field = MatchField::DateOfBirth;
    let Some(doc) = doc else {
        return FieldMatchResult::value_missing(field, app);
    };

    match (normalize::date(app), normalize::date(doc)) {
        (Ok(app_date), Ok(doc_date)) if app_date == doc_date => {
            FieldMatchResult::matched(field, app, doc, 1.0)
        }
        (Ok(_), Ok(_)) => FieldMatchResult::mismatch(
            field,
            app,
            doc,
            0.0,
            "date of birth differs".to_string(),
        ),
        _ => FieldMatchResult::mismatch(field, app, doc, 0.0, "unparseable value".to_string()),
    }
}

/// Address is one composite field: street, city, state, and ZIP must all agree
/// after normalization. Partial agreement reports which components diverged so
/// audit records keep per-subfield detail.
fn match_address(app: &MailingAddress, doc: &ExtractedIdentityDocument) -> FieldMatchResult {
    let field = MatchField::Address;
    let components: [(&str, &str, Option<&String>); 4] = [
        ("street", app.street.as_str(), doc.address_street.as_ref()),
        ("city", app.city.as_str(), doc.address_city.as_ref()),
        ("state", app.state.as_str(), doc.address_state.as_ref()),
        ("zip", app.zip.as_str(), doc.address_zip.as_ref()),
    ];

    let mut agreed = 0usize;
    let mut disagreements = Vec::new();
    for (label, app_raw, doc_raw) in components {
        match doc_raw {
            None => disagreements.push(format!("{label} not present on document")),
            Some(doc_raw) => {
                if normalize::address_part(app_raw) == normalize::address_part(doc_raw) {
                    agreed += 1;
                } else {
                    disagreements.push(format!("{label} differs"));
                }
            }
        }
    }

    let app_display = display_address(app);
    let doc_display = [
        doc.address_street.as_deref(),
        doc.address_city.as_deref(),
        doc.address_state.as_deref(),
        doc.address_zip.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    let confidence = agreed as f32 / 4.0;
    if disagreements.is_empty() {
        FieldMatchResult::matched(field, &app_display, &doc_display, 1.0)
    } else {
        FieldMatchResult::mismatch(
            field,
            &app_display,
            &doc_display,
            confidence,
            disagreements.join(", "),
        )
    }
}

/// Identifiers compare exactly once separators are stripped, so `123-45-6789`
/// and `123456789` are the same number.
fn match_id_number(app: &str, doc: Option<&str>) -> FieldMatchResult {
    let field = MatchField::IdNumber;
    let Some(doc) = doc else {
        return FieldMatchResult::value_missing(field, app);
    };

    let app_norm = normalize::id_number(app);
    let doc_norm = normalize::id_number(doc);
    if app_norm.is_empty() || doc_norm.is_empty() {
        return FieldMatchResult::mismatch(
            field,
            app,
            doc,
            0.0,
            "normalization failure".to_string(),
        );
    }

    if app_norm == doc_norm {
        FieldMatchResult::matched(field, app, doc, 1.0)
    } else {
        FieldMatchResult::mismatch(field, app, doc, 0.0, "identifier differs".to_string())
    }
}

/// Employer names drop corporate suffixes, then accept exact or containment
/// matches; anything weaker is scored by shared tokens.
fn match_employer(app: &str, doc: Option<&str>, config: &DecisionConfig) -> FieldMatchResult {
    let field = MatchField::EmployerName;
    let Some(doc) = doc else {
        return FieldMatchResult::value_missing(field, app);
    };

    let app_norm = normalize::employer(app);
    let doc_norm = normalize::employer(doc);
    if app_norm.is_empty() || doc_norm.is_empty() {
        return FieldMatchResult::mismatch(
            field,
            app,
            doc,
            0.0,
            "normalization failure".to_string(),
        );
    }

    if app_norm == doc_norm {
        return FieldMatchResult::matched(field, app, doc, 1.0);
    }

    if app_norm.contains(&doc_norm) || doc_norm.contains(&app_norm) {
        return FieldMatchResult::matched_with_reason(
            field,
            app,
            doc,
            config.employer_partial_confidence,
            "company name variation".to_string(),
        );
    }

    let app_tokens: Vec<&str> = app_norm.split_whitespace().collect();
    let doc_tokens: Vec<&str> = doc_norm.split_whitespace().collect();
    let common = app_tokens
        .iter()
        .filter(|token| doc_tokens.contains(token))
        .count();

    if common == 0 {
        return FieldMatchResult::mismatch(
            field,
            app,
            doc,
            0.0,
            "no matching words found".to_string(),
        );
    }

    let confidence =
        (common as f32 / app_tokens.len().max(doc_tokens.len()) as f32).min(0.7);
    if confidence > 0.5 {
        FieldMatchResult::matched_with_reason(
            field,
            app,
            doc,
            confidence,
            format!("{common} shared name token(s)"),
        )
    } else {
        FieldMatchResult::mismatch(
            field,
            app,
            doc,
            confidence,
            format!("only {common} shared name token(s)"),
        )
    }
}

fn display_address(address: &MailingAddress) -> String {
    format!(
        "{}, {}, {} {}",
        address.street, address.city, address.state, address.zip
    )
}

/// True when one name's tokens are a subset of the other's, which absorbs
/// middle names and initials present on only one side.
fn token_subset(left: &str, right: &str) -> bool {
    let left_tokens: Vec<&str> = left.split_whitespace().collect();
    let right_tokens: Vec<&str> = right.split_whitespace().collect();
    let contained =
        |inner: &[&str], outer: &[&str]| inner.iter().all(|token| outer.contains(token));
    contained(&left_tokens, &right_tokens) || contained(&right_tokens, &left_tokens)
}

/// Plain two-row Levenshtein over characters.
fn levenshtein(left: &str, right: &str) -> usize {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut previous: Vec<usize> = (0..=right.len()).collect();
    let mut current = vec![0usize; right.len() + 1];

    for (i, l) in left.iter().enumerate() {
        current[0] = i + 1;
        for (j, r) in right.iter().enumerate() {
            let substitution = previous[j] + usize::from(l != r);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[right.len()]
}
