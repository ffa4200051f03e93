//! Named analysis inputs and their acceptance checks.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AppError, AppResult};

pub const KE_INPUT: &str = "allke_csv";
pub const IE_INPUT: &str = "allie_csv";
pub const WK_INPUT: &str = "allwk_csv";

/// One uploaded file: its original name and fully buffered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Buffer `reader`, reading at most one byte past `limit`.
    pub fn from_reader<R: Read>(
        input: &str,
        filename: impl Into<String>,
        reader: R,
        limit: u64,
    ) -> AppResult<Self> {
        let mut data = Vec::new();
        reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;
        if data.len() as u64 > limit {
            return Err(AppError::InputTooLarge {
                input: input.to_string(),
                limit,
            });
        }
        Ok(Self::new(filename, data))
    }

    /// Read a file from disk. The handle is closed before returning.
    pub fn open(input: &str, path: &Path, limit: u64) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| AppError::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_reader(input, filename, file, limit)
    }
}

/// The three uploads an analysis needs. Absent ones are `None`.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInputs {
    pub kinetic: Option<Upload>,
    pub internal: Option<Upload>,
    pub work: Option<Upload>,
}

/// Borrowed view of accepted inputs.
#[derive(Debug, Clone, Copy)]
pub struct CheckedInputs<'a> {
    pub kinetic: &'a Upload,
    pub internal: &'a Upload,
    pub work: &'a Upload,
}

impl<'a> CheckedInputs<'a> {
    pub fn payloads(&self) -> [&'a [u8]; 3] {
        [
            &self.kinetic.data,
            &self.internal.data,
            &self.work.data,
        ]
    }
}

impl AnalysisInputs {
    pub fn new(kinetic: Upload, internal: Upload, work: Upload) -> Self {
        Self {
            kinetic: Some(kinetic),
            internal: Some(internal),
            work: Some(work),
        }
    }

    /// Presence, filename, emptiness and size checks, in that order.
    pub fn check(&self, max_input_bytes: u64) -> AppResult<CheckedInputs<'_>> {
        let slots = [
            (KE_INPUT, self.kinetic.as_ref()),
            (IE_INPUT, self.internal.as_ref()),
            (WK_INPUT, self.work.as_ref()),
        ];

        let missing: Vec<String> = slots
            .iter()
            .filter(|(_, upload)| upload.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        let (Some(kinetic), Some(internal), Some(work)) =
            (self.kinetic.as_ref(), self.internal.as_ref(), self.work.as_ref())
        else {
            return Err(AppError::MissingInput { inputs: missing });
        };

        for (name, upload) in [(KE_INPUT, kinetic), (IE_INPUT, internal), (WK_INPUT, work)] {
            if upload.filename.trim().is_empty() {
                return Err(AppError::EmptyFilename {
                    input: name.to_string(),
                });
            }
            if upload.data.is_empty() {
                return Err(AppError::EmptyPayload {
                    input: name.to_string(),
                });
            }
            if upload.data.len() as u64 > max_input_bytes {
                return Err(AppError::InputTooLarge {
                    input: name.to_string(),
                    limit: max_input_bytes,
                });
            }
        }

        Ok(CheckedInputs {
            kinetic,
            internal,
            work,
        })
    }
}
