//! stt-preflight - audio admissibility checks for speech-to-text intake
//!
//! Decides, before any network call, whether an uploaded audio file may be
//! forwarded to a remote transcription API, and produces structured metadata
//! about it. Checks run in a fixed order without short-circuiting: format
//! and size from filesystem metadata, then a single symphonia decode pass
//! that feeds the duration, sample-rate and speech-presence checks.
//!
//! Content problems are data (`CheckFailure`), never errors; validation is
//! synchronous, stateless, and safe to run concurrently across submissions.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::config::ValidationConfig;
pub use crate::error::{PreflightError, Result};
pub use crate::services::admission::AdmissionValidator;
pub use crate::services::report::{ProcessingMode, SubmissionReport};
pub use crate::types::{
    AudioFormat, AudioMetrics, AudioSubmission, CheckFailure, ValidationResult,
};
