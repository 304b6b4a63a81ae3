//! Claimgate-State: Eval Run Persistence for Claimgate
//!
//! This crate provides the persistence abstraction for evaluation runs:
//! run lifecycle records, per-case result rows, and progress metadata.
//!
//! ## Key Components
//!
//! - `EvalRunStore`: the storage trait the evaluation runner writes through
//! - `EvalRunRecord` / `CaseResultRecord`: the persisted record shapes
//! - `MemoryEvalRunStore`: in-memory fake for tests (in `fakes`)
//!
//! Backends live outside this crate; the runner treats every call as a
//! synchronous, never-silently-failing operation — a storage failure
//! propagates and fails the run.

mod error;
pub mod fakes;
pub mod storage_traits;

pub use error::StorageError;
pub use storage_traits::{
    CaseResultRecord, EvalRunId, EvalRunRecord, EvalRunStatus, EvalRunStore, ProgressMetadata,
    RunTotals, StorageResult,
};
