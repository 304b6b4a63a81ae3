//! Batch evaluation orchestration.
//!
//! `EvaluationRunner` drives one eval run: it filters the case set,
//! transitions the run record to Running, processes cases sequentially
//! (analyze → grade → persist → progress update), and finalizes the run
//! as Completed or Failed. A single case's failure is contained to that
//! case; a storage failure escapes the per-case boundary and fails the
//! whole run.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use claimgate_state::{CaseResultRecord, EvalRunId, EvalRunStore, ProgressMetadata, RunTotals};

use crate::domain::claim::ClaimInput;
use crate::domain::error::Result;
use crate::domain::eval::{EvalSet, GraderConfig, TestCase};
use crate::grader::{grade, ActualOutput};
use crate::obs::{
    emit_case_errored, emit_case_graded, emit_run_completed, emit_run_failed, emit_run_started,
    RunSpan,
};
use crate::pacing::{NoPacing, PacingPolicy};
use crate::service::ValidityAnalysisService;

/// Final summary of one evaluation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Cases in the (possibly filtered) run.
    pub total_count: u32,

    /// Cases that passed grading.
    pub passed_count: u32,

    /// Cases that failed grading or errored.
    pub failed_count: u32,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Fraction of cases that passed (0.0–1.0); 0.0 for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            f64::from(self.passed_count) / f64::from(self.total_count)
        }
    }
}

/// Outcome of processing one case, ready to persist.
struct CaseOutcome {
    actual_output: String,
    passed: bool,
    error_message: Option<String>,
}

impl CaseOutcome {
    fn failure(message: String) -> Self {
        Self {
            actual_output: format!("ERROR: {message}"),
            passed: false,
            error_message: Some(message),
        }
    }
}

/// Sequential evaluation runner. Exactly one runner writes a given run
/// record; cases are processed in the case set's insertion order.
pub struct EvaluationRunner {
    service: ValidityAnalysisService,
    store: Arc<dyn EvalRunStore>,
    pacing: Arc<dyn PacingPolicy>,
}

impl EvaluationRunner {
    pub fn new(service: ValidityAnalysisService, store: Arc<dyn EvalRunStore>) -> Self {
        Self {
            service,
            store,
            pacing: Arc::new(NoPacing),
        }
    }

    /// Override the inter-case pacing policy.
    pub fn with_pacing(mut self, pacing: Arc<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Execute an eval run over the given case set.
    ///
    /// `selected_patent_ids` restricts the run to cases whose patent id is
    /// in the list; `None` processes every case. The run record must be in
    /// Pending state. Returns the final report, or the storage error that
    /// failed the run.
    pub async fn execute(
        &self,
        run_id: &EvalRunId,
        eval_set: &EvalSet,
        selected_patent_ids: Option<&[String]>,
    ) -> Result<RunReport> {
        let _span = RunSpan::enter(run_id.as_str());

        match self.run_cases(run_id, eval_set, selected_patent_ids).await {
            Ok(report) => Ok(report),
            Err(err) => {
                emit_run_failed(run_id.as_str(), &err.to_string());
                if let Err(store_err) = self.store.fail_run(run_id, &err.to_string()).await {
                    error!(
                        run_id = %run_id,
                        error = %store_err,
                        "could not mark eval run failed",
                    );
                }
                Err(err)
            }
        }
    }

    async fn run_cases(
        &self,
        run_id: &EvalRunId,
        eval_set: &EvalSet,
        selected_patent_ids: Option<&[String]>,
    ) -> Result<RunReport> {
        let start = Instant::now();
        let cases = filter_cases(&eval_set.test_cases, selected_patent_ids);
        let total_count = cases.len() as u32;

        self.store.start_run(run_id, total_count).await?;
        emit_run_started(run_id.as_str(), &eval_set.name, total_count);

        let mut passed_count = 0u32;
        let mut failed_count = 0u32;
        let mut processed = 0u32;

        for (index, case) in cases.iter().enumerate() {
            if index > 0 {
                self.pacing.pause().await;
            }

            let outcome = self.process_case(case, &eval_set.grader).await;
            if outcome.passed {
                passed_count += 1;
            } else {
                failed_count += 1;
            }

            if let Some(message) = &outcome.error_message {
                emit_case_errored(run_id.as_str(), &case.id, message);
            }
            emit_case_graded(
                run_id.as_str(),
                &case.id,
                index as u32 + 1,
                total_count,
                outcome.passed,
            );

            self.store
                .append_result(
                    run_id,
                    CaseResultRecord {
                        test_case_id: case.id.clone(),
                        actual_output: outcome.actual_output,
                        expected_output: case.expected_output.to_string(),
                        passed: outcome.passed,
                        error_message: outcome.error_message,
                        created_at: Utc::now(),
                    },
                )
                .await?;

            processed += 1;
            self.store
                .record_progress(
                    run_id,
                    ProgressMetadata {
                        progress: round2(f64::from(processed) / f64::from(total_count) * 100.0),
                        processed,
                        total: total_count,
                        selected_patent_ids: selected_patent_ids.map(<[String]>::to_vec),
                    },
                )
                .await?;
        }

        self.store
            .complete_run(
                run_id,
                RunTotals {
                    total_count,
                    passed_count,
                    failed_count,
                },
            )
            .await?;

        let report = RunReport {
            total_count,
            passed_count,
            failed_count,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        emit_run_completed(
            run_id.as_str(),
            total_count,
            passed_count,
            failed_count,
            report.pass_rate(),
        );
        Ok(report)
    }

    /// Process one case. Analysis, grading, and serialization failures are
    /// contained here as a failed outcome; only storage errors propagate,
    /// and those are raised by the caller, not this method.
    async fn process_case(&self, case: &TestCase, grader: &GraderConfig) -> CaseOutcome {
        let input: ClaimInput = match serde_json::from_value(case.input_variables.clone()) {
            Ok(input) => input,
            Err(err) => return CaseOutcome::failure(format!("invalid input variables: {err}")),
        };

        let result = self.service.analyze(&input).await;
        if result.is_error() {
            let message = result
                .status_message
                .unwrap_or_else(|| "analysis failed".to_string());
            return CaseOutcome::failure(message);
        }

        let actual = ActualOutput::from(&result);
        let actual_output = match serde_json::to_string(&actual) {
            Ok(json) => json,
            Err(err) => return CaseOutcome::failure(format!("could not serialize result: {err}")),
        };

        CaseOutcome {
            actual_output,
            passed: grade(&actual, &case.expected_output, grader),
            error_message: None,
        }
    }
}

/// Restrict the case set to patent ids in the allow-list. Cases whose
/// input variables carry no readable patent id never match a list.
fn filter_cases<'a>(cases: &'a [TestCase], selected: Option<&[String]>) -> Vec<&'a TestCase> {
    match selected {
        None => cases.iter().collect(),
        Some(ids) => cases
            .iter()
            .filter(|case| {
                case.input_variables
                    .get("patent_id")
                    .and_then(serde_json::Value::as_str)
                    .is_some_and(|patent_id| ids.iter().any(|id| id == patent_id))
            })
            .collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
