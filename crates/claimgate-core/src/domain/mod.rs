//! Domain models for Claimgate.
//!
//! Canonical definitions for the core entities:
//! - `ClaimInput`: the four input variables of one claim analysis
//! - `AnalysisResult`: the outcome of one analysis pass
//! - `EvalSet` / `TestCase`: labeled cases plus grading configuration

pub mod analysis;
pub mod claim;
pub mod error;
pub mod eval;

// Re-export main types and errors
pub use analysis::{AnalysisResult, AnalysisStatus};
pub use claim::ClaimInput;
pub use error::{ClaimgateError, Result};
pub use eval::{EvalSet, ExpectedFields, ExpectedOutput, GraderConfig, GraderKind, TestCase};
