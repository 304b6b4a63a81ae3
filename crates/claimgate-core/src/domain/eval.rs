//! Eval set definitions and grading configuration.

use serde::{Deserialize, Serialize};

/// Enumeration of available grading strategies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case", content = "value")]
pub enum GraderKind {
    /// Structural equality (field-by-field for structured expectations).
    ExactMatch,

    /// Case-insensitive substring test.
    Contains,

    /// Case-insensitive regex match against the configured pattern.
    Regex,

    /// Unrecognized strategy name; graded with exact-match semantics.
    Custom(String),
}

/// Grading configuration for an eval set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraderConfig {
    /// Which strategy to apply.
    pub kind: GraderKind,

    /// Pattern for the `Regex` strategy. A regex grade with no pattern
    /// always fails rather than erroring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl GraderConfig {
    pub fn exact_match() -> Self {
        Self {
            kind: GraderKind::ExactMatch,
            pattern: None,
        }
    }

    pub fn contains() -> Self {
        Self {
            kind: GraderKind::Contains,
            pattern: None,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            kind: GraderKind::Regex,
            pattern: Some(pattern.into()),
        }
    }
}

/// Structured ground-truth fields for field-by-field grading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_matter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventive_concept: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_eligibility: Option<String>,
}

/// Ground-truth expectation for one test case: either the structured
/// three-field object or a legacy plain string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExpectedOutput {
    Structured(ExpectedFields),
    Text(String),
}

impl ExpectedOutput {
    /// Parse a stored expected-output string: JSON objects become the
    /// structured form, anything else falls back to plain text.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<ExpectedFields>(raw) {
            Ok(fields) => Self::Structured(fields),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Scalar view used by the contains/regex strategies: the plain string,
    /// or the expected overall eligibility for structured expectations.
    pub fn scalar(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Structured(fields) => fields.overall_eligibility.as_deref().unwrap_or(""),
        }
    }
}

impl std::fmt::Display for ExpectedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Structured(fields) => {
                let json = serde_json::to_string(fields).map_err(|_| std::fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

/// A single labeled test case within an eval set. Created during data
/// import; read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Unique identifier for this test case.
    pub id: String,

    /// Human-readable label (e.g. "US10642911 Claim 1").
    pub description: String,

    /// Raw claim input variables; parsed per case during a run so a
    /// malformed case fails alone, not the batch.
    pub input_variables: serde_json::Value,

    /// Ground-truth expectation.
    pub expected_output: ExpectedOutput,
}

/// An ordered collection of test cases plus the grading strategy to apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalSet {
    /// Name of the eval set.
    pub name: String,

    /// Grading configuration applied to every case.
    pub grader: GraderConfig,

    /// Test cases in processing order.
    pub test_cases: Vec<TestCase>,
}

impl EvalSet {
    /// Create an empty eval set.
    pub fn new(name: impl Into<String>, grader: GraderConfig) -> Self {
        Self {
            name: name.into(),
            grader,
            test_cases: Vec::new(),
        }
    }

    /// Add a test case.
    pub fn add_test_case(mut self, test_case: TestCase) -> Self {
        self.test_cases.push(test_case);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grader_kind_serde_roundtrip() {
        for kind in [
            GraderKind::ExactMatch,
            GraderKind::Contains,
            GraderKind::Regex,
            GraderKind::Custom("json_schema".to_string()),
        ] {
            let json = serde_json::to_string(&kind).expect("serialize");
            let deserialized: GraderKind = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(kind, deserialized);
        }
    }

    #[test]
    fn test_expected_output_parse_structured() {
        let parsed = ExpectedOutput::parse(
            r#"{"subject_matter":"Abstract","inventive_concept":"No","overall_eligibility":"ineligible"}"#,
        );

        match parsed {
            ExpectedOutput::Structured(fields) => {
                assert_eq!(fields.subject_matter.as_deref(), Some("Abstract"));
                assert_eq!(fields.inventive_concept.as_deref(), Some("No"));
                assert_eq!(fields.overall_eligibility.as_deref(), Some("ineligible"));
            }
            other => panic!("expected structured, got {other:?}"),
        }
    }

    #[test]
    fn test_expected_output_parse_legacy_text() {
        let parsed = ExpectedOutput::parse("eligible");
        assert_eq!(parsed, ExpectedOutput::Text("eligible".to_string()));
        assert_eq!(parsed.scalar(), "eligible");
    }

    #[test]
    fn test_expected_output_scalar_for_structured() {
        let expected = ExpectedOutput::Structured(ExpectedFields {
            subject_matter: None,
            inventive_concept: None,
            overall_eligibility: Some("eligible".to_string()),
        });
        assert_eq!(expected.scalar(), "eligible");

        let empty = ExpectedOutput::Structured(ExpectedFields::default());
        assert_eq!(empty.scalar(), "");
    }

    #[test]
    fn test_eval_set_fluent_api() {
        let eval_set = EvalSet::new("alice-eval", GraderConfig::exact_match()).add_test_case(
            TestCase {
                id: "tc-1".to_string(),
                description: "US10642911 Claim 1".to_string(),
                input_variables: serde_json::json!({
                    "patent_id": "US10642911",
                    "claim_number": 1,
                    "claim_text": "A method...",
                    "abstract": "Systems and methods...",
                }),
                expected_output: ExpectedOutput::Text("eligible".to_string()),
            },
        );

        assert_eq!(eval_set.test_cases.len(), 1);
        assert_eq!(eval_set.grader.kind, GraderKind::ExactMatch);
    }

    #[test]
    fn test_expected_output_untagged_serde() {
        let structured: ExpectedOutput =
            serde_json::from_str(r#"{"overall_eligibility":"eligible"}"#).expect("deserialize");
        assert!(matches!(structured, ExpectedOutput::Structured(_)));

        let text: ExpectedOutput = serde_json::from_str(r#""eligible""#).expect("deserialize");
        assert_eq!(text, ExpectedOutput::Text("eligible".to_string()));
    }
}
