//! Audio admissibility validation
//!
//! Decides, before any network call, whether an uploaded file may be
//! submitted for transcription. Checks run in a fixed order and never
//! short-circuit, so `failures` is exhaustive for user feedback: cheap
//! metadata checks (format, size) first, then a single decode pass that
//! feeds every metric-based check at once.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{PreflightError, Result};
use crate::services::decoder::{self, DecodeError};
use crate::services::speech_presence::SpeechPresenceAnalyzer;
use crate::types::{AudioFormat, AudioMetrics, AudioSubmission, CheckFailure, ValidationResult};

/// Stateless validator; one instance serves any number of concurrent
/// submissions since the configuration is read-only.
pub struct AdmissionValidator {
    config: ValidationConfig,
}

impl AdmissionValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Capture a submission from a path.
    ///
    /// Size is measured from filesystem metadata here; sizes declared by the
    /// upload client are never trusted.
    pub fn submission_for_path(&self, path: &Path) -> Result<AudioSubmission> {
        let metadata = fs::metadata(path).map_err(|e| PreflightError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let declared_format = AudioFormat::from_extension(&extension);

        Ok(AudioSubmission {
            path: path.to_path_buf(),
            extension,
            declared_format,
            size_bytes: metadata.len(),
        })
    }

    /// Validate the file at `path` end to end.
    pub fn validate_path(&self, path: &Path) -> Result<ValidationResult> {
        let submission = self.submission_for_path(path)?;
        self.validate(&submission)
    }

    /// Apply every check to a submission.
    ///
    /// No side effects beyond reading the file; the same submission validates
    /// to the same result every time. `Err` only for files the process cannot
    /// read at all.
    pub fn validate(&self, submission: &AudioSubmission) -> Result<ValidationResult> {
        let mut failures = Vec::new();

        // 1. Format: extension must be in the configured allowed set.
        let format_allowed = submission
            .declared_format
            .map(|f| self.config.supported_formats.contains(&f))
            .unwrap_or(false);
        if !format_allowed {
            failures.push(CheckFailure::UnsupportedFormat {
                declared: if submission.extension.is_empty() {
                    "(none)".to_string()
                } else {
                    submission.extension.clone()
                },
                supported: self.config.supported_formats_label(),
            });
        }

        // 2. Size: non-empty and within the configured limit.
        let limit_bytes = self.config.max_file_size_bytes();
        if submission.size_bytes == 0 {
            failures.push(CheckFailure::EmptyFile);
        } else if submission.size_bytes > limit_bytes {
            failures.push(CheckFailure::FileTooLarge {
                size_bytes: submission.size_bytes,
                limit_bytes,
            });
        }

        // 3. Decodability. An empty file is never handed to the decoder; the
        // metric checks below become vacuous without a decode.
        let metrics = if submission.size_bytes == 0 {
            None
        } else {
            match decoder::decode_audio_file(&submission.path) {
                Ok(decoded) => {
                    let stats = SpeechPresenceAnalyzer::new(self.config.silence_threshold)
                        .analyze(&decoded.samples);
                    Some(AudioMetrics {
                        duration_seconds: decoded.duration_seconds,
                        sample_rate: decoded.sample_rate,
                        channels: decoded.channels,
                        peak_amplitude: stats.peak_amplitude,
                        rms_level: stats.rms_level,
                        speech_ratio: stats.speech_ratio,
                    })
                }
                Err(DecodeError::Open { path, source }) => {
                    return Err(PreflightError::Io { path, source });
                }
                Err(DecodeError::Undecodable(reason)) => {
                    failures.push(CheckFailure::UndecodableAudio { reason });
                    None
                }
            }
        };

        if let Some(metrics) = &metrics {
            // 4. Duration.
            if metrics.duration_seconds < self.config.min_audio_duration_sec {
                failures.push(CheckFailure::TooShort {
                    duration_seconds: metrics.duration_seconds,
                    minimum_seconds: self.config.min_audio_duration_sec,
                });
            }

            // 5. Sample rate.
            if metrics.sample_rate < self.config.min_sample_rate_hz
                || metrics.sample_rate > self.config.max_sample_rate_hz
            {
                failures.push(CheckFailure::SampleRateOutOfRange {
                    sample_rate: metrics.sample_rate,
                    minimum_hz: self.config.min_sample_rate_hz,
                    maximum_hz: self.config.max_sample_rate_hz,
                });
            }

            // 6. Speech presence (advisory).
            if metrics.speech_ratio < self.config.min_speech_ratio {
                failures.push(CheckFailure::LikelySilent {
                    speech_ratio: metrics.speech_ratio,
                    minimum_ratio: self.config.min_speech_ratio,
                });
            }
        }

        let admissible = failures.iter().all(CheckFailure::is_advisory);

        debug!(
            path = %submission.path.display(),
            admissible = admissible,
            failures = failures.len(),
            decoded = metrics.is_some(),
            "Validation complete"
        );

        Ok(ValidationResult {
            admissible,
            failures,
            metrics,
        })
    }
}
