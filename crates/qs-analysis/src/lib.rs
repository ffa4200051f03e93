//! qs-analysis: stability detection and quasi-static classification.
//!
//! Given the RI column of an aligned energy frame and the RET column of a
//! work frame, find when each ratio crosses its thresholds ([`CriticalTimes`])
//! and grade the run ([`Verdict`]).

pub mod classify;
pub mod error;
pub mod stability;
pub mod thresholds;

pub use classify::{Grade, Verdict, classify};
pub use error::{AnalysisError, AnalysisResult};
pub use stability::{
    Condition, CriticalTimes, ScanMode, StableTime, find_critical_times, find_first_stable,
};
