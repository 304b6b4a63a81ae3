//! Patent claim input variables.

use serde::{Deserialize, Serialize};

/// The four input variables for one claim analysis, as carried in a test
/// case's `input_variables` JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimInput {
    /// Patent identifier (e.g. "US10642911").
    pub patent_id: String,

    /// Claim number within the patent.
    pub claim_number: i64,

    /// Full claim text under analysis.
    pub claim_text: String,

    /// Patent abstract, provided as context.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl ClaimInput {
    pub fn new(
        patent_id: impl Into<String>,
        claim_number: i64,
        claim_text: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            patent_id: patent_id.into(),
            claim_number,
            claim_text: claim_text.into(),
            abstract_text: abstract_text.into(),
        }
    }
}
