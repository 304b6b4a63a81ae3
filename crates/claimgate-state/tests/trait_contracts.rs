//! Trait contract tests for EvalRunStore.
//!
//! These tests verify the behavioral contract of the storage trait using
//! the in-memory fake. Any conforming implementation must pass these.

use chrono::Utc;
use claimgate_state::fakes::MemoryEvalRunStore;
use claimgate_state::storage_traits::*;
use claimgate_state::StorageError;

fn sample_result(case_id: &str, passed: bool) -> CaseResultRecord {
    CaseResultRecord {
        test_case_id: case_id.to_string(),
        actual_output: r#"{"overall_eligibility":"eligible"}"#.to_string(),
        expected_output: r#"{"overall_eligibility":"eligible"}"#.to_string(),
        passed,
        error_message: None,
        created_at: Utc::now(),
    }
}

fn progress(processed: u32, total: u32) -> ProgressMetadata {
    ProgressMetadata {
        progress: (processed as f64 / total as f64 * 10_000.0).round() / 100.0,
        processed,
        total,
        selected_patent_ids: None,
    }
}

#[tokio::test]
async fn create_run_starts_pending() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    let record = store.get_run(&run_id).await.unwrap();

    assert_eq!(record.status, EvalRunStatus::Pending);
    assert_eq!(record.eval_set_name, "alice-eval");
    assert!(record.started_at.is_none());
    assert!(record.completed_at.is_none());
    assert_eq!(record.total_count, 0);
}

#[tokio::test]
async fn start_run_transitions_to_running() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 5).await.unwrap();
    let record = store.get_run(&run_id).await.unwrap();

    assert_eq!(record.status, EvalRunStatus::Running);
    assert_eq!(record.total_count, 5);
    assert!(record.started_at.is_some());
}

#[tokio::test]
async fn start_run_twice_is_rejected() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 5).await.unwrap();
    let err = store.start_run(&run_id, 5).await.unwrap_err();

    assert!(matches!(err, StorageError::InvalidRunState { .. }));
}

#[tokio::test]
async fn append_result_requires_running() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    let err = store
        .append_result(&run_id, sample_result("tc-1", true))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidRunState { .. }));
}

#[tokio::test]
async fn results_are_returned_in_insertion_order() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 3).await.unwrap();

    for id in ["tc-1", "tc-2", "tc-3"] {
        store
            .append_result(&run_id, sample_result(id, true))
            .await
            .unwrap();
    }

    let results = store.get_results(&run_id).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.test_case_id.as_str()).collect();
    assert_eq!(ids, vec!["tc-1", "tc-2", "tc-3"]);
}

#[tokio::test]
async fn complete_run_finalizes_counts_and_pins_progress() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 2).await.unwrap();
    store.record_progress(&run_id, progress(1, 2)).await.unwrap();
    store
        .complete_run(
            &run_id,
            RunTotals {
                total_count: 2,
                passed_count: 1,
                failed_count: 1,
            },
        )
        .await
        .unwrap();

    let record = store.get_run(&run_id).await.unwrap();
    assert_eq!(record.status, EvalRunStatus::Completed);
    assert_eq!(record.passed_count, 1);
    assert_eq!(record.failed_count, 1);
    assert!(record.completed_at.is_some());
    assert_eq!(record.progress.unwrap().progress, 100.0);
}

#[tokio::test]
async fn complete_run_is_terminal() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 1).await.unwrap();
    let totals = RunTotals {
        total_count: 1,
        passed_count: 1,
        failed_count: 0,
    };
    store.complete_run(&run_id, totals).await.unwrap();

    assert!(store.complete_run(&run_id, totals).await.is_err());
    assert!(store.fail_run(&run_id, "late failure").await.is_err());
    assert!(store
        .append_result(&run_id, sample_result("tc-1", true))
        .await
        .is_err());
}

#[tokio::test]
async fn fail_run_from_running_records_message() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 3).await.unwrap();
    store.fail_run(&run_id, "model backend unreachable").await.unwrap();

    let record = store.get_run(&run_id).await.unwrap();
    assert_eq!(record.status, EvalRunStatus::Failed);
    assert_eq!(
        record.error_message.as_deref(),
        Some("model backend unreachable")
    );
    assert!(record.completed_at.is_some());
}

#[tokio::test]
async fn fail_run_allowed_from_pending() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.fail_run(&run_id, "died before first case").await.unwrap();

    let record = store.get_run(&run_id).await.unwrap();
    assert_eq!(record.status, EvalRunStatus::Failed);
}

#[tokio::test]
async fn progress_history_preserves_update_sequence() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 4).await.unwrap();

    for processed in 1..=4 {
        store
            .record_progress(&run_id, progress(processed, 4))
            .await
            .unwrap();
    }

    let history = store.progress_history(&run_id);
    let values: Vec<f64> = history.iter().map(|p| p.progress).collect();
    assert_eq!(values, vec![25.0, 50.0, 75.0, 100.0]);
}

#[tokio::test]
async fn unknown_run_is_not_found() {
    let store = MemoryEvalRunStore::new();
    let bogus = EvalRunId("no-such-run".to_string());

    assert!(matches!(
        store.get_run(&bogus).await.unwrap_err(),
        StorageError::RunNotFound { .. }
    ));
    assert!(matches!(
        store.start_run(&bogus, 1).await.unwrap_err(),
        StorageError::RunNotFound { .. }
    ));
}

#[tokio::test]
async fn run_record_serde_roundtrip() {
    let store = MemoryEvalRunStore::new();
    let run_id = store.create_run("alice-eval").await.unwrap();
    store.start_run(&run_id, 1).await.unwrap();
    let record = store.get_run(&run_id).await.unwrap();

    let json = serde_json::to_string(&record).expect("serialize");
    let deserialized: EvalRunRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(record, deserialized);
}
