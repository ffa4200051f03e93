//! qs-results: analysis report model and on-disk report cache.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::{compute_analysis_id, is_analysis_id};
pub use store::ReportStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report not found: {analysis_id}")]
    ReportNotFound { analysis_id: String },

    #[error("Invalid analysis id: {0}")]
    InvalidId(String),
}
