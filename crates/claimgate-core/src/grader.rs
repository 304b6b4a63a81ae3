//! Grading engine.
//!
//! Compares a produced analysis result against a ground-truth expectation
//! under a configurable strategy. Grading is pure and total: absent fields
//! normalize to the empty string, unparseable regex patterns fail the
//! grade, and an unknown strategy falls back to exact-match semantics.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::eval::{ExpectedFields, ExpectedOutput, GraderConfig, GraderKind};

/// The gradable view of an analysis result: the three verdict fields plus
/// the forced score, serialized as the stored actual output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActualOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_matter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventive_concept: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_eligibility: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_score: Option<i64>,
}

impl ActualOutput {
    /// Scalar view used by the contains/regex strategies: the overall
    /// eligibility verdict.
    pub fn scalar(&self) -> &str {
        self.overall_eligibility.as_deref().unwrap_or("")
    }
}

impl From<&AnalysisResult> for ActualOutput {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            subject_matter: result.subject_matter.map(|v| v.as_str().to_string()),
            inventive_concept: result.inventive_concept.map(|v| v.as_str().to_string()),
            overall_eligibility: result.overall_eligibility.map(|v| v.as_str().to_string()),
            validity_score: result.validity_score,
        }
    }
}

/// One mismatched field in a failed structured comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

fn normalize(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_lowercase()
}

/// Grade an actual output against an expectation under the configured
/// strategy. Pure; never fails.
pub fn grade(actual: &ActualOutput, expected: &ExpectedOutput, config: &GraderConfig) -> bool {
    match &config.kind {
        GraderKind::Contains => {
            normalize(Some(actual.scalar())).contains(&normalize(Some(expected.scalar())))
        }
        GraderKind::Regex => match &config.pattern {
            None => false,
            Some(pattern) => RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(actual.scalar()))
                .unwrap_or(false),
        },
        GraderKind::ExactMatch | GraderKind::Custom(_) => exact_match(actual, expected),
    }
}

fn exact_match(actual: &ActualOutput, expected: &ExpectedOutput) -> bool {
    match expected {
        // All three verdict fields must agree for a structured pass.
        ExpectedOutput::Structured(fields) => {
            let subject = subject_matter_matches(actual, fields);
            let inventive = inventive_concept_matches(actual, fields);
            let eligibility = eligibility_matches(actual, fields);
            subject && inventive && eligibility
        }
        ExpectedOutput::Text(text) => {
            normalize(Some(actual.scalar())) == normalize(Some(text))
        }
    }
}

fn subject_matter_matches(actual: &ActualOutput, expected: &ExpectedFields) -> bool {
    canonical_subject_matter(normalize(actual.subject_matter.as_deref()))
        == canonical_subject_matter(normalize(expected.subject_matter.as_deref()))
}

fn inventive_concept_matches(actual: &ActualOutput, expected: &ExpectedFields) -> bool {
    canonical_inventive_concept(normalize(actual.inventive_concept.as_deref()))
        == canonical_inventive_concept(normalize(expected.inventive_concept.as_deref()))
}

fn eligibility_matches(actual: &ActualOutput, expected: &ExpectedFields) -> bool {
    normalize(actual.overall_eligibility.as_deref())
        == normalize(expected.overall_eligibility.as_deref())
}

// Ground truth rows carry the step-label vocabulary while results carry
// the schema vocabulary; fold both onto the schema form before comparing.
fn canonical_subject_matter(value: String) -> String {
    match value.as_str() {
        "natural phenomenon" => "natural_phenomenon".to_string(),
        "not abstract/not natural phenomenon" => "patentable".to_string(),
        _ => value,
    }
}

fn canonical_inventive_concept(value: String) -> String {
    match value.as_str() {
        "yes" => "inventive".to_string(),
        "no" => "uninventive".to_string(),
        "-" => "skipped".to_string(),
        _ => value,
    }
}

/// Per-field differences for a failed structured comparison, for
/// downstream display. Empty when everything matches.
pub fn field_differences(actual: &ActualOutput, expected: &ExpectedFields) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();

    if !subject_matter_matches(actual, expected) {
        diffs.push(FieldDiff {
            field: "subject_matter".to_string(),
            expected: expected.subject_matter.clone().unwrap_or_default(),
            actual: actual.subject_matter.clone().unwrap_or_default(),
        });
    }
    if !inventive_concept_matches(actual, expected) {
        diffs.push(FieldDiff {
            field: "inventive_concept".to_string(),
            expected: expected.inventive_concept.clone().unwrap_or_default(),
            actual: actual.inventive_concept.clone().unwrap_or_default(),
        });
    }
    if !eligibility_matches(actual, expected) {
        diffs.push(FieldDiff {
            field: "overall_eligibility".to_string(),
            expected: expected.overall_eligibility.clone().unwrap_or_default(),
            actual: actual.overall_eligibility.clone().unwrap_or_default(),
        });
    }

    diffs
}
