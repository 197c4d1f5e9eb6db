use serde::{Deserialize, Serialize};

/// Tunable dials for the matching rules.
///
/// The defaults mirror the documented tolerances: one Levenshtein edit per ten
/// characters of name, containment-style employer matches scored at 0.8, and
/// expired identity documents rejected outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Levenshtein edits tolerated per ten characters of the longer normalized name.
    pub name_edits_per_ten_chars: u8,
    /// Confidence assigned when one employer name contains the other.
    pub employer_partial_confidence: f32,
    /// Reject outright when the ID is past its expiry date.
    pub expired_id_auto_reject: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            name_edits_per_ten_chars: 1,
            employer_partial_confidence: 0.8,
            expired_id_auto_reject: true,
        }
    }
}

impl DecisionConfig {
    /// Edit budget for a name of `len` normalized characters, rounded up per
    /// started block of ten.
    pub(crate) fn max_name_edits(&self, len: usize) -> usize {
        len.div_ceil(10) * self.name_edits_per_ten_chars as usize
    }
}
