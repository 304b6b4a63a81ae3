//! Single-claim analysis results.

use serde::{Deserialize, Serialize};

use crate::eligibility::{Eligibility, InventiveConcept, SubjectMatter};

/// Outcome status of one analysis call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// The output of one claim analysis pass. Constructed once per service
/// invocation and immutable afterwards.
///
/// On success every analysis field is populated; on error only
/// `status_message` carries information — callers treat errors uniformly
/// whether they came from a rule violation or an infrastructure failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Whether the analysis produced a verdict.
    pub status: AnalysisStatus,

    /// Failure description, populated only on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Patent identifier, echoed from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patent_number: Option<String>,

    /// Claim number, echoed from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_number: Option<i64>,

    /// Step-one classification as produced by the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_matter: Option<SubjectMatter>,

    /// Step-two classification after forcing (always `Skipped` when the
    /// subject matter is patentable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventive_concept: Option<InventiveConcept>,

    /// Validity score after forcing against the eligibility verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_score: Option<i64>,

    /// The resolved eligibility verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_eligibility: Option<Eligibility>,
}

impl AnalysisResult {
    /// Build a successful result.
    pub fn success(
        patent_number: String,
        claim_number: i64,
        subject_matter: SubjectMatter,
        inventive_concept: InventiveConcept,
        validity_score: i64,
        overall_eligibility: Eligibility,
    ) -> Self {
        Self {
            status: AnalysisStatus::Success,
            status_message: None,
            patent_number: Some(patent_number),
            claim_number: Some(claim_number),
            subject_matter: Some(subject_matter),
            inventive_concept: Some(inventive_concept),
            validity_score: Some(validity_score),
            overall_eligibility: Some(overall_eligibility),
        }
    }

    /// Build an error result carrying only a failure message.
    pub fn error(status_message: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Error,
            status_message: Some(status_message.into()),
            patent_number: None,
            claim_number: None,
            subject_matter: None,
            inventive_concept: None,
            validity_score: None,
            overall_eligibility: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AnalysisStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result_populates_all_fields() {
        let result = AnalysisResult::success(
            "US10642911".to_string(),
            1,
            SubjectMatter::Abstract,
            InventiveConcept::Uninventive,
            2,
            Eligibility::Ineligible,
        );

        assert_eq!(result.status, AnalysisStatus::Success);
        assert!(result.status_message.is_none());
        assert_eq!(result.overall_eligibility, Some(Eligibility::Ineligible));
        assert!(!result.is_error());
    }

    #[test]
    fn test_error_result_carries_only_message() {
        let result = AnalysisResult::error("Failed to analyze patent validity.");

        assert!(result.is_error());
        assert_eq!(
            result.status_message.as_deref(),
            Some("Failed to analyze patent validity.")
        );
        assert!(result.subject_matter.is_none());
        assert!(result.validity_score.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let result = AnalysisResult::success(
            "US7654321".to_string(),
            3,
            SubjectMatter::Patentable,
            InventiveConcept::Skipped,
            4,
            Eligibility::Eligible,
        );

        let json = serde_json::to_string(&result).expect("serialize");
        let deserialized: AnalysisResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_error_serialization_omits_absent_fields() {
        let json = serde_json::to_string(&AnalysisResult::error("boom")).expect("serialize");
        assert!(json.contains("\"status\":\"error\""));
        assert!(!json.contains("subject_matter"));
        assert!(!json.contains("validity_score"));
    }
}
