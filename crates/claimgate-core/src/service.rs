//! Single-claim validity analysis orchestration.
//!
//! `ValidityAnalysisService` drives one claim through the full pipeline:
//! render prompt → invoke model → classify labels → resolve eligibility →
//! normalize score → force step two. A subject-matter rule violation
//! short-circuits the call; a score violation is advisory. Every
//! collaborator failure is caught at this boundary and converted to a
//! uniform error result — callers never see the cause structurally.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::analysis::AnalysisResult;
use crate::domain::claim::ClaimInput;
use crate::domain::error::Result;
use crate::eligibility::{resolve_eligibility, InventiveConcept, SubjectMatter};
use crate::llm::{response_schema, ModelInvoker, PromptRenderer, VALIDITY_TEMPLATE_ID};
use crate::obs::emit_score_forced;
use crate::score::normalize_score;

/// Generic failure message returned for any analysis error whose cause is
/// not a rule violation. The underlying cause is logged, never surfaced.
pub const ANALYSIS_ERROR_MESSAGE: &str = "Failed to analyze patent validity.";

/// Orchestrates one claim analysis against the model collaborators.
pub struct ValidityAnalysisService {
    renderer: Arc<dyn PromptRenderer>,
    invoker: Arc<dyn ModelInvoker>,
    template_id: String,
}

impl ValidityAnalysisService {
    pub fn new(renderer: Arc<dyn PromptRenderer>, invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            renderer,
            invoker,
            template_id: VALIDITY_TEMPLATE_ID.to_string(),
        }
    }

    /// Override the prompt template id.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Analyze one claim. Never returns an `Err`: rule violations and
    /// infrastructure failures both surface as `status = error`.
    pub async fn analyze(&self, input: &ClaimInput) -> AnalysisResult {
        match self.try_analyze(input).await {
            Ok(result) => result,
            Err(err) => {
                error!(
                    patent_number = %input.patent_id,
                    claim_number = input.claim_number,
                    error = %err,
                    "validity analysis failed",
                );
                AnalysisResult::error(ANALYSIS_ERROR_MESSAGE)
            }
        }
    }

    async fn try_analyze(&self, input: &ClaimInput) -> Result<AnalysisResult> {
        let rendered = self.renderer.render(&self.template_id, input).await?;
        let schema = response_schema();
        let raw = self.invoker.ask(&rendered, &schema).await?;

        let subject_matter = SubjectMatter::classify(&raw.subject_matter);
        let inventive_concept = InventiveConcept::classify(&raw.inventive_concept);

        let ruling = resolve_eligibility(subject_matter, inventive_concept);
        if ruling.is_invalid() {
            let message = ruling
                .error_message()
                .unwrap_or_else(|| ANALYSIS_ERROR_MESSAGE.to_string());
            warn!(
                patent_number = %input.patent_id,
                raw_subject_matter = %raw.subject_matter,
                raw_inventive_concept = %raw.inventive_concept,
                "eligibility ruling invalid: {message}",
            );
            return Ok(AnalysisResult::error(message));
        }

        // A resolved ruling implies both classifications succeeded.
        let (Some(eligibility), Some(subject_matter), Some(inventive_concept)) =
            (ruling.eligibility(), subject_matter, inventive_concept)
        else {
            return Ok(AnalysisResult::error(ANALYSIS_ERROR_MESSAGE));
        };

        let score = normalize_score(raw.validity_score, eligibility);
        if let Some(detail) = &score.detail {
            emit_score_forced(&input.patent_id, raw.validity_score, score.forced, detail);
        }

        Ok(AnalysisResult::success(
            raw.patent_number
                .unwrap_or_else(|| input.patent_id.clone()),
            raw.claim_number.unwrap_or(input.claim_number),
            subject_matter,
            inventive_concept.forced_for(subject_matter),
            score.forced,
            eligibility,
        ))
    }
}
