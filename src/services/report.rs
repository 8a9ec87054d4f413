//! Descriptive submission report
//!
//! Summarizes a submission for the UI layer and the submission pipeline:
//! sizes, downstream encoding, whether transcoding is needed, and which
//! recognition endpoint the file qualifies for.

use serde::Serialize;

use crate::types::{AudioFormat, AudioSubmission};

/// Size ceiling for the synchronous recognition endpoint (10 MB).
pub const MAX_SYNC_BYTES: u64 = 10 * 1024 * 1024;

/// Size ceiling for asynchronous long-running recognition (1 GB).
pub const MAX_ASYNC_BYTES: u64 = 1000 * 1024 * 1024;

/// Which recognition endpoint a file of this size must use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// Small enough for the synchronous endpoint.
    Synchronous,
    /// Requires long-running (asynchronous) recognition.
    Asynchronous,
}

/// Per-file report rendered alongside the validation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReport {
    pub filename: String,
    pub size_bytes: u64,
    pub size_mb: f64,
    /// Recognized format, if the extension maps to one.
    pub format: Option<AudioFormat>,
    /// Encoding tag the recognition API will receive, if the format is known.
    pub transcription_encoding: Option<&'static str>,
    /// True when the submission pipeline must transcode before upload.
    pub requires_conversion: bool,
    pub processing_mode: ProcessingMode,
    /// False when the file exceeds even the asynchronous endpoint ceiling.
    pub within_api_ceiling: bool,
}

impl SubmissionReport {
    pub fn for_submission(submission: &AudioSubmission) -> Self {
        let filename = submission
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let processing_mode = if submission.size_bytes <= MAX_SYNC_BYTES {
            ProcessingMode::Synchronous
        } else {
            ProcessingMode::Asynchronous
        };

        Self {
            filename,
            size_bytes: submission.size_bytes,
            size_mb: submission.size_bytes as f64 / (1024.0 * 1024.0),
            format: submission.declared_format,
            transcription_encoding: submission
                .declared_format
                .map(|f| f.transcription_encoding()),
            requires_conversion: submission
                .declared_format
                .map(|f| f.requires_conversion())
                .unwrap_or(false),
            processing_mode,
            within_api_ceiling: submission.size_bytes <= MAX_ASYNC_BYTES,
        }
    }
}
