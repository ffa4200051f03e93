//! Error types for analysis operations.

use qs_core::QsError;
use qs_series::Column;
use thiserror::Error;

/// Errors that can occur while detecting or classifying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Column {column} is not available on this frame")]
    MissingColumn { column: Column },

    #[error("Numeric error: {0}")]
    Numeric(#[from] QsError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
