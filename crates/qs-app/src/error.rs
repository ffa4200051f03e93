//! Error types for the qs-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// separates problems with the user's inputs from internal failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing input file(s): {}", inputs.join(", "))]
    MissingInput { inputs: Vec<String> },

    #[error("Input '{input}' has an empty filename")]
    EmptyFilename { input: String },

    #[error("Input '{input}' is empty")]
    EmptyPayload { input: String },

    #[error("Input '{input}' exceeds the {limit} byte limit")]
    InputTooLarge { input: String, limit: u64 },

    #[error("No valid numeric rows found in: {}", inputs.join(", "))]
    EmptySeries { inputs: Vec<String> },

    #[error("ALLKE and ALLIE share no overlapping time range")]
    EmptyAlignment,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Unknown series: {0}")]
    UnknownSeries(String),
}

/// Result type for qs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the error is caused by the inputs or request rather than by
    /// the tool itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingInput { .. }
                | AppError::EmptyFilename { .. }
                | AppError::EmptyPayload { .. }
                | AppError::InputTooLarge { .. }
                | AppError::EmptySeries { .. }
                | AppError::EmptyAlignment
                | AppError::Config(_)
                | AppError::InputRead { .. }
                | AppError::ReportNotFound(_)
                | AppError::UnknownSeries(_)
        )
    }

    /// Message safe to show to the user. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal { .. } => {
                "An internal error occurred while analyzing the files.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "internal analysis error");
        AppError::Internal { message }
    }
}

// Conversions from backend error types
impl From<qs_analysis::AnalysisError> for AppError {
    fn from(err: qs_analysis::AnalysisError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<qs_core::QsError> for AppError {
    fn from(err: qs_core::QsError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<qs_results::ResultsError> for AppError {
    fn from(err: qs_results::ResultsError) -> Self {
        match err {
            qs_results::ResultsError::ReportNotFound { analysis_id } => {
                AppError::ReportNotFound(analysis_id)
            }
            qs_results::ResultsError::InvalidId(id) => AppError::ReportNotFound(id),
            other => AppError::Results(other.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
