use chrono::NaiveDate;

/// Date formats accepted from both the enrollment form and OCR output.
///
/// ISO first because that is what the form submits; the slash form shows up on
/// North American identity documents.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Street-suffix and unit abbreviations expanded before address comparison.
/// A fixed lookup, matched per whitespace token after punctuation stripping.
const ADDRESS_ABBREVIATIONS: [(&str, &str); 10] = [
    ("st", "street"),
    ("ave", "avenue"),
    ("rd", "road"),
    ("blvd", "boulevard"),
    ("dr", "drive"),
    ("ln", "lane"),
    ("ct", "court"),
    ("hwy", "highway"),
    ("apt", "apartment"),
    ("ste", "suite"),
];

/// Corporate suffixes dropped from employer names before comparison.
const CORPORATE_SUFFIXES: [&str; 5] = ["inc", "corp", "llc", "ltd", "co"];

/// A date string matched none of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' does not match any accepted date format")]
pub struct InvalidDateFormat {
    pub value: String,
}

pub(crate) fn date(raw: &str) -> Result<NaiveDate, InvalidDateFormat> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    Err(InvalidDateFormat {
        value: trimmed.to_string(),
    })
}

/// Canonical form for person names: punctuation dropped, whitespace collapsed,
/// case folded. The original value is retained by the caller for display.
pub(crate) fn name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '.'))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical form for one address component, with common abbreviations expanded.
pub(crate) fn address_part(raw: &str) -> String {
    raw.split_whitespace()
        .map(|token| {
            let token = token
                .trim_matches(|c: char| matches!(c, ',' | '.' | '#'))
                .to_lowercase();
            ADDRESS_ABBREVIATIONS
                .iter()
                .find(|(short, _)| *short == token)
                .map(|(_, long)| (*long).to_string())
                .unwrap_or(token)
        })
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form for identifiers: separators stripped, case folded upward so
/// `123-45-6789` and `123456789` compare equal.
pub(crate) fn id_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Canonical form for employer names: name folding plus corporate suffix removal.
pub(crate) fn employer(raw: &str) -> String {
    name(raw)
        .split_whitespace()
        .filter(|token| !CORPORATE_SUFFIXES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
