//! In-memory fakes for storage traits (testing only)
//!
//! Provides `MemoryEvalRunStore`, which satisfies the `EvalRunStore`
//! contract without any external dependencies. Progress updates are kept
//! as a full history so tests can assert on the update sequence, not just
//! the latest value.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::StorageError;
use crate::storage_traits::*;

#[derive(Debug)]
struct RunState {
    record: EvalRunRecord,
    results: Vec<CaseResultRecord>,
    progress_history: Vec<ProgressMetadata>,
}

/// In-memory eval run store backed by a `HashMap<run_id, RunState>`.
#[derive(Debug, Default)]
pub struct MemoryEvalRunStore {
    runs: Mutex<HashMap<String, RunState>>,
}

impl MemoryEvalRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every progress update recorded for a run, in write order.
    pub fn progress_history(&self, run_id: &EvalRunId) -> Vec<ProgressMetadata> {
        let runs = self.runs.lock().unwrap();
        runs.get(&run_id.0)
            .map(|state| state.progress_history.clone())
            .unwrap_or_default()
    }
}

fn wrong_state(record: &EvalRunRecord, expected: &str) -> StorageError {
    StorageError::InvalidRunState {
        run_id: record.run_id.0.clone(),
        status: format!("{:?}", record.status),
        expected: expected.to_string(),
    }
}

#[async_trait]
impl EvalRunStore for MemoryEvalRunStore {
    async fn create_run(&self, eval_set_name: &str) -> StorageResult<EvalRunId> {
        let run_id = EvalRunId::new();
        let record = EvalRunRecord {
            run_id: run_id.clone(),
            eval_set_name: eval_set_name.to_string(),
            status: EvalRunStatus::Pending,
            started_at: None,
            completed_at: None,
            total_count: 0,
            passed_count: 0,
            failed_count: 0,
            error_message: None,
            progress: None,
            created_at: Utc::now(),
        };
        let mut runs = self.runs.lock().unwrap();
        runs.insert(
            run_id.0.clone(),
            RunState {
                record,
                results: Vec::new(),
                progress_history: Vec::new(),
            },
        );
        Ok(run_id)
    }

    async fn start_run(&self, run_id: &EvalRunId, total_count: u32) -> StorageResult<()> {
        let mut runs = self.runs.lock().unwrap();
        let state = runs
            .get_mut(&run_id.0)
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })?;
        if state.record.status != EvalRunStatus::Pending {
            return Err(wrong_state(&state.record, "Pending"));
        }
        state.record.status = EvalRunStatus::Running;
        state.record.total_count = total_count;
        state.record.started_at = Some(Utc::now());
        Ok(())
    }

    async fn record_progress(
        &self,
        run_id: &EvalRunId,
        progress: ProgressMetadata,
    ) -> StorageResult<()> {
        let mut runs = self.runs.lock().unwrap();
        let state = runs
            .get_mut(&run_id.0)
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })?;
        if state.record.status != EvalRunStatus::Running {
            return Err(wrong_state(&state.record, "Running"));
        }
        state.progress_history.push(progress.clone());
        state.record.progress = Some(progress);
        Ok(())
    }

    async fn append_result(
        &self,
        run_id: &EvalRunId,
        result: CaseResultRecord,
    ) -> StorageResult<()> {
        let mut runs = self.runs.lock().unwrap();
        let state = runs
            .get_mut(&run_id.0)
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })?;
        if state.record.status != EvalRunStatus::Running {
            return Err(wrong_state(&state.record, "Running"));
        }
        state.results.push(result);
        Ok(())
    }

    async fn complete_run(&self, run_id: &EvalRunId, totals: RunTotals) -> StorageResult<()> {
        let mut runs = self.runs.lock().unwrap();
        let state = runs
            .get_mut(&run_id.0)
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })?;
        if state.record.status != EvalRunStatus::Running {
            return Err(wrong_state(&state.record, "Running"));
        }
        state.record.status = EvalRunStatus::Completed;
        state.record.total_count = totals.total_count;
        state.record.passed_count = totals.passed_count;
        state.record.failed_count = totals.failed_count;
        state.record.completed_at = Some(Utc::now());
        let selected = state
            .record
            .progress
            .as_ref()
            .and_then(|p| p.selected_patent_ids.clone());
        state.record.progress = Some(ProgressMetadata {
            progress: 100.0,
            processed: totals.total_count,
            total: totals.total_count,
            selected_patent_ids: selected,
        });
        Ok(())
    }

    async fn fail_run(&self, run_id: &EvalRunId, error_message: &str) -> StorageResult<()> {
        let mut runs = self.runs.lock().unwrap();
        let state = runs
            .get_mut(&run_id.0)
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })?;
        match state.record.status {
            EvalRunStatus::Pending | EvalRunStatus::Running => {}
            _ => return Err(wrong_state(&state.record, "Pending or Running")),
        }
        state.record.status = EvalRunStatus::Failed;
        state.record.error_message = Some(error_message.to_string());
        state.record.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn get_run(&self, run_id: &EvalRunId) -> StorageResult<EvalRunRecord> {
        let runs = self.runs.lock().unwrap();
        runs.get(&run_id.0)
            .map(|state| state.record.clone())
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })
    }

    async fn get_results(&self, run_id: &EvalRunId) -> StorageResult<Vec<CaseResultRecord>> {
        let runs = self.runs.lock().unwrap();
        runs.get(&run_id.0)
            .map(|state| state.results.clone())
            .ok_or_else(|| StorageError::RunNotFound {
                run_id: run_id.0.clone(),
            })
    }
}
