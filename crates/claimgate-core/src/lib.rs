//! Claimgate Core Library
//!
//! Alice-test eligibility rules and evaluation orchestration for patent
//! claims: classify the model's step-one/step-two labels, resolve them
//! through the fixed eligibility table, reconcile the validity score, and
//! grade batches of labeled test cases against ground truth.

pub mod domain;
pub mod eligibility;
pub mod grader;
pub mod llm;
pub mod obs;
pub mod pacing;
pub mod runner;
pub mod score;
pub mod service;
pub mod telemetry;

pub use domain::{
    AnalysisResult, AnalysisStatus, ClaimInput, ClaimgateError, EvalSet, ExpectedFields,
    ExpectedOutput, GraderConfig, GraderKind, Result, TestCase,
};

pub use eligibility::{
    resolve_eligibility, Eligibility, EligibilityRuling, InventiveConcept, SubjectMatter,
};

pub use grader::{field_differences, grade, ActualOutput, FieldDiff};

pub use llm::{
    response_schema, LlmVerdict, ModelInvoker, PromptRenderer, RenderedPrompt,
    VALIDITY_TEMPLATE_ID,
};

pub use claimgate_state::{
    CaseResultRecord, EvalRunId, EvalRunRecord, EvalRunStatus, EvalRunStore, ProgressMetadata,
    RunTotals, StorageError,
};

pub use obs::{
    emit_case_errored, emit_case_graded, emit_run_completed, emit_run_failed, emit_run_started,
    emit_score_forced, RunSpan,
};

pub use pacing::{FixedDelay, NoPacing, PacingPolicy};
pub use runner::{EvaluationRunner, RunReport};
pub use score::{normalize_score, ScoreRuling};
pub use service::{ValidityAnalysisService, ANALYSIS_ERROR_MESSAGE};
pub use telemetry::init_tracing;

/// Claimgate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
