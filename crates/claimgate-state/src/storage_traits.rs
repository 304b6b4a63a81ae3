//! Storage trait definitions for Claimgate
//!
//! `EvalRunStore` is the persistence abstraction the evaluation runner
//! writes through: run lifecycle transitions, per-case result rows, and
//! run-level progress metadata. It is async and backend-agnostic; an
//! in-memory fake is provided for testing via the `fakes` module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Unique identifier for an evaluation run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvalRunId(pub String);

impl EvalRunId {
    /// Generate a new random EvalRunId
    pub fn new() -> Self {
        EvalRunId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EvalRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EvalRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an evaluation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalRunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Run-level progress metadata, rewritten after every processed case.
///
/// `progress` is a percentage rounded to two decimals; a concurrent
/// observer polls this to render run progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetadata {
    /// Percentage of cases processed (0.0–100.0, two decimals).
    pub progress: f64,

    /// Cases processed so far.
    pub processed: u32,

    /// Total cases in the (possibly filtered) run.
    pub total: u32,

    /// Patent-id allow-list the run was filtered to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_patent_ids: Option<Vec<String>>,
}

/// Final counters written when a run completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub total_count: u32,
    pub passed_count: u32,
    pub failed_count: u32,
}

/// One row per (test case, run) pair. Created exactly once per processed
/// case and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResultRecord {
    /// Identifier of the test case this result belongs to.
    pub test_case_id: String,

    /// Serialized actual output (JSON on success, `ERROR: ...` text on failure).
    pub actual_output: String,

    /// Serialized expected output from the test case.
    pub expected_output: String,

    /// Whether the case passed grading.
    pub passed: bool,

    /// Error text when the case failed with an error rather than a grade miss.
    pub error_message: Option<String>,

    /// When the result row was created.
    pub created_at: DateTime<Utc>,
}

/// Full eval run record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRunRecord {
    pub run_id: EvalRunId,
    pub eval_set_name: String,
    pub status: EvalRunStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_count: u32,
    pub passed_count: u32,
    pub failed_count: u32,
    pub error_message: Option<String>,
    pub progress: Option<ProgressMetadata>,
    pub created_at: DateTime<Utc>,
}

/// Evaluation run store.
///
/// Guarantees:
/// - A run transitions: Pending → Running → Completed | Failed.
///   Completed and Failed are terminal; `fail_run` is additionally allowed
///   from Pending (a run that dies before its first case).
/// - Result rows are append-only and ordered by insertion.
/// - `complete_run` pins progress to exactly 100.
/// - Failures are returned to the caller, never swallowed.
#[async_trait]
pub trait EvalRunStore: Send + Sync {
    /// Create a new Pending run for the named eval set, returning its ID.
    async fn create_run(&self, eval_set_name: &str) -> StorageResult<EvalRunId>;

    /// Transition Pending → Running, fixing `total_count` and stamping
    /// `started_at`. Fails if the run is not Pending.
    async fn start_run(&self, run_id: &EvalRunId, total_count: u32) -> StorageResult<()>;

    /// Rewrite the run's progress metadata. Fails if the run is not Running.
    async fn record_progress(
        &self,
        run_id: &EvalRunId,
        progress: ProgressMetadata,
    ) -> StorageResult<()>;

    /// Append one per-case result row. Fails if the run is not Running.
    async fn append_result(
        &self,
        run_id: &EvalRunId,
        result: CaseResultRecord,
    ) -> StorageResult<()>;

    /// Transition Running → Completed with final counters, stamping
    /// `completed_at` and pinning progress to 100.
    async fn complete_run(&self, run_id: &EvalRunId, totals: RunTotals) -> StorageResult<()>;

    /// Transition Pending|Running → Failed with an error message, stamping
    /// `completed_at`.
    async fn fail_run(&self, run_id: &EvalRunId, error_message: &str) -> StorageResult<()>;

    /// Retrieve a run record by ID.
    async fn get_run(&self, run_id: &EvalRunId) -> StorageResult<EvalRunRecord>;

    /// Retrieve all result rows for a run, in insertion order.
    async fn get_results(&self, run_id: &EvalRunId) -> StorageResult<Vec<CaseResultRecord>>;
}
