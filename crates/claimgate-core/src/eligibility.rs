//! Alice-test rules engine.
//!
//! Maps raw model labels onto the closed step-one/step-two enums and
//! resolves the (subject matter, inventive concept) pair through the fixed
//! eligibility table to produce an [`EligibilityRuling`] — a structured
//! verdict the analysis service turns into a success or an error. All
//! functions here are pure; the orchestration layer decides what to log.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Step One — subject matter
// ---------------------------------------------------------------------------

/// Alice step-one classification of a claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubjectMatter {
    /// Directed to an abstract idea.
    Abstract,

    /// Directed to a natural phenomenon.
    NaturalPhenomenon,

    /// Directed to neither — patentable subject matter.
    Patentable,
}

impl SubjectMatter {
    /// Map a raw model label to a subject matter value.
    ///
    /// Accepts both the step-one label vocabulary ("Abstract",
    /// "Natural Phenomenon", "Not Abstract/Not Natural Phenomenon") and the
    /// response-schema vocabulary ("abstract", "natural_phenomenon",
    /// "patentable"). Unmapped input yields `None`, never a default.
    pub fn classify(label: &str) -> Option<Self> {
        match label.trim() {
            "Abstract" | "abstract" => Some(Self::Abstract),
            "Natural Phenomenon" | "natural_phenomenon" => Some(Self::NaturalPhenomenon),
            "Not Abstract/Not Natural Phenomenon" | "patentable" => Some(Self::Patentable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::NaturalPhenomenon => "natural_phenomenon",
            Self::Patentable => "patentable",
        }
    }
}

impl std::fmt::Display for SubjectMatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Step Two — inventive concept
// ---------------------------------------------------------------------------

/// Alice step-two classification of a claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventiveConcept {
    /// Elements beyond the abstract idea/phenomenon add something inventive.
    Inventive,

    /// No inventive concept beyond the abstract idea/phenomenon.
    Uninventive,

    /// Step two was not evaluated.
    Skipped,
}

impl InventiveConcept {
    /// Map a raw model label to an inventive concept value.
    ///
    /// Accepts both the step-two label vocabulary ("Yes"/"No"/"-") and the
    /// response-schema vocabulary ("inventive"/"uninventive"/"skipped").
    /// Unmapped input yields `None`, never a default.
    pub fn classify(label: &str) -> Option<Self> {
        match label.trim() {
            "Yes" | "inventive" => Some(Self::Inventive),
            "No" | "uninventive" => Some(Self::Uninventive),
            "-" | "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// The value forced for persistence: patentable subject matter makes
    /// step two moot, so the stored value is always `Skipped` in that case.
    pub fn forced_for(self, subject_matter: SubjectMatter) -> Self {
        if subject_matter == SubjectMatter::Patentable {
            Self::Skipped
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventive => "inventive",
            Self::Uninventive => "uninventive",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for InventiveConcept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Eligibility resolution
// ---------------------------------------------------------------------------

/// A resolved eligibility verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible,
}

impl Eligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::Ineligible => "ineligible",
        }
    }
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of resolving a (subject matter, inventive concept) pair.
///
/// Two invalid flavors are distinguished: a legally incoherent combination
/// (subject matter identified, step two skipped) and an unmapped pair
/// (either side failed classification).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityRuling {
    /// The pair resolved to an eligible/ineligible verdict.
    Resolved(Eligibility),

    /// Subject matter was identified but step two was skipped.
    StepTwoMissing { subject_matter: SubjectMatter },

    /// The pair is outside the rule table (unmapped input on either side).
    IncorrectData {
        subject_matter: Option<SubjectMatter>,
        inventive_concept: Option<InventiveConcept>,
    },
}

/// Resolve a classified pair through the fixed eligibility table.
///
/// Total over the 3×3 domain plus the unmapped catch-all: no pair panics
/// or goes unhandled.
pub fn resolve_eligibility(
    subject_matter: Option<SubjectMatter>,
    inventive_concept: Option<InventiveConcept>,
) -> EligibilityRuling {
    use Eligibility::*;
    use EligibilityRuling::*;
    use InventiveConcept::*;
    use SubjectMatter::*;

    match (subject_matter, inventive_concept) {
        (Some(Patentable), Some(Skipped | Inventive | Uninventive)) => Resolved(Eligible),
        (Some(Abstract), Some(Inventive)) => Resolved(Eligible),
        (Some(Abstract), Some(Uninventive)) => Resolved(Ineligible),
        (Some(Abstract), Some(Skipped)) => StepTwoMissing {
            subject_matter: Abstract,
        },
        (Some(NaturalPhenomenon), Some(Inventive)) => Resolved(Eligible),
        (Some(NaturalPhenomenon), Some(Uninventive)) => Resolved(Ineligible),
        (Some(NaturalPhenomenon), Some(Skipped)) => StepTwoMissing {
            subject_matter: NaturalPhenomenon,
        },
        (subject_matter, inventive_concept) => IncorrectData {
            subject_matter,
            inventive_concept,
        },
    }
}

impl EligibilityRuling {
    /// The resolved verdict, when the pair was coherent.
    pub fn eligibility(&self) -> Option<Eligibility> {
        match self {
            Self::Resolved(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether the pair was incoherent or unmapped.
    pub fn is_invalid(&self) -> bool {
        !matches!(self, Self::Resolved(_))
    }

    /// Human-readable cause for an invalid ruling. `None` when resolved.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Resolved(_) => None,
            Self::StepTwoMissing { subject_matter } => Some(format!(
                "Subject matter was identified as {subject_matter} but cannot determine inventive concept"
            )),
            Self::IncorrectData {
                subject_matter,
                inventive_concept,
            } => Some(format!(
                "LLM respond with incorrect data. Subject matter: {}, inventive concept: {}",
                subject_matter.map_or("unknown", |v| v.as_str()),
                inventive_concept.map_or("unknown", |v| v.as_str()),
            )),
        }
    }
}
