//! Shared application service layer for the quasi-static checker.
//!
//! Centralizes input acceptance, configuration, pipeline orchestration,
//! report shaping and report-store queries for the CLI frontend.

pub mod analysis_service;
pub mod config;
pub mod error;
pub mod input;
pub mod progress;
pub mod query;
pub mod report;

// Re-export key types for convenience
pub use analysis_service::{
    AnalysisOptions, AnalysisOutcome, AnalysisRequest, AnalysisResponse, IngestSummary,
    StageTimings, analyze, ensure_analysis, ensure_analysis_with_progress,
};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use input::{AnalysisInputs, IE_INPUT, KE_INPUT, Upload, WK_INPUT};
pub use progress::{AnalysisProgressEvent, AnalysisStage};
pub use query::{ReportSummary, extract_series, list_reports, load_report, open_store};
pub use report::{build_report, format_percentage, format_time, report_json};
