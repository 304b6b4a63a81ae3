//! Validity score normalization.
//!
//! Reconciles the model's 1–5 validity score against the resolved
//! eligibility verdict. An inconsistent score is forced to a consistent
//! value and flagged — the flag is advisory, never fatal to the analysis.

use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;

/// Outcome of normalizing a raw validity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRuling {
    /// The score to persist: forced to agree with the eligibility verdict.
    pub forced: i64,

    /// True exactly when the raw score contradicted the verdict.
    pub violated: bool,

    /// Violation description, present only when `violated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Normalize a raw validity score against a resolved eligibility verdict.
///
/// Eligible claims score at least 3; ineligible claims score below 3. A
/// raw score on the wrong side of that line is forced (3 for eligible,
/// 2 for ineligible) and flagged. Out-of-range raw scores are not clamped:
/// a consistent out-of-range value passes through unchanged.
pub fn normalize_score(raw: i64, eligibility: Eligibility) -> ScoreRuling {
    let forced = match eligibility {
        Eligibility::Eligible if raw < 3 => 3,
        Eligibility::Ineligible if raw >= 3 => 2,
        _ => raw,
    };

    if forced == raw {
        ScoreRuling {
            forced,
            violated: false,
            detail: None,
        }
    } else {
        ScoreRuling {
            forced,
            violated: true,
            detail: Some(format!(
                "LLM respond with incorrect data. Validity score: {raw}, overall eligibility: {eligibility}"
            )),
        }
    }
}
