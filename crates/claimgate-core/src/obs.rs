//! Structured observability hooks for eval run lifecycle events.
//!
//! This module provides:
//! - Run-scoped tracing spans via the `RunSpan` RAII guard
//! - Emission functions for key lifecycle events: run start/finish,
//!   per-case grading, score forcing
//!
//! Events are emitted at `info!`/`warn!` level; configure verbosity via
//! `RUST_LOG` (see `telemetry::init_tracing`).

use tracing::{info, warn};

/// RAII guard that enters a run-scoped tracing span for the duration of a run.
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    /// Create and enter a span tagged with the run id.
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("claimgate.run", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: evaluation run started.
pub fn emit_run_started(run_id: &str, eval_set: &str, total_count: u32) {
    info!(
        event = "run.started",
        run_id = %run_id,
        eval_set = %eval_set,
        total_count = total_count,
    );
}

/// Emit event: one test case graded.
pub fn emit_case_graded(run_id: &str, case_id: &str, index: u32, total: u32, passed: bool) {
    info!(
        event = "case.graded",
        run_id = %run_id,
        case_id = %case_id,
        index = index,
        total = total,
        passed = passed,
    );
}

/// Emit event: one test case failed with an error rather than a grade miss.
pub fn emit_case_errored(run_id: &str, case_id: &str, error: &str) {
    warn!(
        event = "case.errored",
        run_id = %run_id,
        case_id = %case_id,
        error = %error,
    );
}

/// Emit event: a validity score contradicted the eligibility verdict and
/// was forced to a consistent value.
pub fn emit_score_forced(patent_number: &str, raw: i64, forced: i64, detail: &str) {
    warn!(
        event = "score.forced",
        patent_number = %patent_number,
        raw_score = raw,
        forced_score = forced,
        detail = %detail,
    );
}

/// Emit event: evaluation run completed with final counters.
pub fn emit_run_completed(run_id: &str, total: u32, passed: u32, failed: u32, pass_rate: f64) {
    info!(
        event = "run.completed",
        run_id = %run_id,
        total_count = total,
        passed_count = passed,
        failed_count = failed,
        pass_rate = pass_rate,
    );
}

/// Emit event: evaluation run failed before completing.
pub fn emit_run_failed(run_id: &str, error: &str) {
    warn!(
        event = "run.failed",
        run_id = %run_id,
        error = %error,
    );
}
