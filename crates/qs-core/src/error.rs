use thiserror::Error;

pub type QsResult<T> = Result<T, QsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Length mismatch: {what} (left={left}, right={right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
}
