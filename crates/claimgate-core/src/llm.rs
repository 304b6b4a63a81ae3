//! Model invocation boundary.
//!
//! Defines the `PromptRenderer` and `ModelInvoker` async traits the
//! analysis service calls through, plus the wire types on either side of
//! that boundary. The HTTP client and prompt template storage live outside
//! this crate; the service only needs "rendered prompt in, structured
//! verdict out".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::claim::ClaimInput;
use crate::domain::error::Result;

/// Prompt template id for the validity analysis agent.
pub const VALIDITY_TEMPLATE_ID: &str = "validity-101-agent";

/// Model used when the rendered template does not specify one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Sampling temperature used when the template does not specify one.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Completion budget used when the template does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// A fully rendered prompt plus its runtime options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedPrompt {
    /// System instructions.
    pub system_message: String,

    /// User-facing prompt content.
    pub content: String,

    /// Model identifier.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Completion token budget.
    pub max_tokens: u32,
}

impl Default for RenderedPrompt {
    fn default() -> Self {
        Self {
            system_message: String::new(),
            content: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// The structured verdict returned by the model.
///
/// `patent_number` and `claim_number` are echoes of the inputs and may be
/// omitted by the model; the service falls back to the original inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmVerdict {
    #[serde(default)]
    pub patent_number: Option<String>,

    #[serde(default)]
    pub claim_number: Option<i64>,

    /// Raw step-one label.
    pub subject_matter: String,

    /// Raw step-two label.
    pub inventive_concept: String,

    /// Raw validity score (nominally 1–5).
    pub validity_score: i64,
}

/// JSON schema constraining the model's structured response.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "patent_number": {
                "type": "string",
                "description": "The patent number as inputted by the user"
            },
            "claim_number": {
                "type": "number",
                "description": "The claim number evaluated for the patent, as inputted by the user"
            },
            "subject_matter": {
                "type": "string",
                "enum": ["abstract", "natural_phenomenon", "patentable"],
                "description": "The subject matter of the claim"
            },
            "inventive_concept": {
                "type": "string",
                "enum": ["inventive", "uninventive", "skipped"],
                "description": "The inventive concept of the claim"
            },
            "validity_score": {
                "type": "number",
                "minimum": 1,
                "maximum": 5,
                "description": "Score from 1 to 5 with the validity strength"
            }
        },
        "required": [
            "patent_number",
            "claim_number",
            "subject_matter",
            "inventive_concept",
            "validity_score"
        ],
        "additionalProperties": false
    })
}

/// Trait for prompt template rendering backends.
#[async_trait]
pub trait PromptRenderer: Send + Sync {
    /// Render the named template with the claim's input variables.
    async fn render(&self, template_id: &str, input: &ClaimInput) -> Result<RenderedPrompt>;
}

/// Trait for model invocation backends.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Ask the model for a structured verdict constrained by `schema`.
    async fn ask(
        &self,
        prompt: &RenderedPrompt,
        schema: &serde_json::Value,
    ) -> Result<LlmVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_prompt_defaults() {
        let prompt = RenderedPrompt::default();
        assert_eq!(prompt.model, "gpt-4o");
        assert_eq!(prompt.temperature, 0.1);
        assert_eq!(prompt.max_tokens, 1200);
    }

    #[test]
    fn test_verdict_deserializes_without_echo_fields() {
        let json = r#"{
            "subject_matter": "abstract",
            "inventive_concept": "uninventive",
            "validity_score": 2
        }"#;

        let verdict: LlmVerdict = serde_json::from_str(json).expect("deserialize");
        assert!(verdict.patent_number.is_none());
        assert!(verdict.claim_number.is_none());
        assert_eq!(verdict.subject_matter, "abstract");
        assert_eq!(verdict.validity_score, 2);
    }

    #[test]
    fn test_verdict_requires_analysis_fields() {
        let json = r#"{"patent_number": "US1", "claim_number": 1}"#;
        assert!(serde_json::from_str::<LlmVerdict>(json).is_err());
    }

    #[test]
    fn test_response_schema_constrains_labels() {
        let schema = response_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["properties"]["subject_matter"]["enum"],
            json!(["abstract", "natural_phenomenon", "patentable"])
        );
        assert_eq!(
            schema["properties"]["inventive_concept"]["enum"],
            json!(["inventive", "uninventive", "skipped"])
        );
        assert_eq!(schema["properties"]["validity_score"]["minimum"], 1);
        assert_eq!(schema["properties"]["validity_score"]["maximum"], 5);
        assert_eq!(schema["additionalProperties"], false);
    }
}
