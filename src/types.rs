//! Core types for audio admissibility validation
//!
//! A submission is one user-supplied file captured at the moment of
//! validation. Validation produces a `ValidationResult` whose failures are
//! plain data, never panics or errors; only environment problems (unreadable
//! files) surface as `PreflightError`.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Audio formats recognized for transcription intake.
///
/// The set is fixed: extensions outside it can never be configured as
/// supported and always fail the format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
    M4a,
    Ogg,
    Flac,
    Aac,
    Wma,
}

impl AudioFormat {
    /// Every recognized format, in canonical display order.
    pub const ALL: [AudioFormat; 7] = [
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::M4a,
        AudioFormat::Ogg,
        AudioFormat::Flac,
        AudioFormat::Aac,
        AudioFormat::Wma,
    ];

    /// Parse a format tag from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" => Some(AudioFormat::M4a),
            "ogg" => Some(AudioFormat::Ogg),
            "flac" => Some(AudioFormat::Flac),
            "aac" => Some(AudioFormat::Aac),
            "wma" => Some(AudioFormat::Wma),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "aac",
            AudioFormat::Wma => "wma",
        }
    }

    /// Encoding tag the downstream recognition API expects for this format.
    ///
    /// m4a/aac/wma are transcoded to MP3 by the submission pipeline before
    /// upload, so they report the MP3 encoding.
    pub fn transcription_encoding(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "LINEAR16",
            AudioFormat::Flac => "FLAC",
            AudioFormat::Ogg => "OGG_OPUS",
            AudioFormat::Mp3 | AudioFormat::M4a | AudioFormat::Aac | AudioFormat::Wma => "MP3",
        }
    }

    /// True when the submission pipeline must transcode before upload.
    pub fn requires_conversion(&self) -> bool {
        matches!(self, AudioFormat::M4a | AudioFormat::Aac | AudioFormat::Wma)
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-supplied file at the moment of validation.
///
/// The caller owns the file for the duration of validation; nothing here is
/// persisted across requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSubmission {
    /// Filesystem location of the uploaded content.
    pub path: PathBuf,
    /// Extension as supplied by the uploader, lowercased (empty when absent).
    pub extension: String,
    /// Recognized format tag; `None` when the extension is not in the fixed set.
    pub declared_format: Option<AudioFormat>,
    /// Size measured from filesystem metadata. Never trusted from
    /// client-declared metadata.
    pub size_bytes: u64,
}

/// A single validation finding.
///
/// Advisory findings are reported to the caller but never block
/// admissibility.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckFailure {
    /// Extension is not in the configured allowed set.
    #[error("unsupported format \"{declared}\" (supported: {supported})")]
    UnsupportedFormat { declared: String, supported: String },

    /// File exceeds the configured maximum size.
    #[error("file too large: {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// Zero-byte upload.
    #[error("file is empty")]
    EmptyFile,

    /// The bytes could not be parsed as audio.
    #[error("undecodable audio: {reason}")]
    UndecodableAudio { reason: String },

    /// Decoded duration is below the configured minimum.
    #[error("audio too short: {duration_seconds:.2}s is below the {minimum_seconds:.2}s minimum")]
    TooShort {
        duration_seconds: f64,
        minimum_seconds: f64,
    },

    /// Sample rate falls outside the configured range.
    #[error("sample rate {sample_rate} Hz outside supported range {minimum_hz}-{maximum_hz} Hz")]
    SampleRateOutOfRange {
        sample_rate: u32,
        minimum_hz: u32,
        maximum_hz: u32,
    },

    /// Advisory: active-sample ratio suggests the recording contains no speech.
    #[error("likely silent: speech ratio {speech_ratio:.3} is below {minimum_ratio:.3}")]
    LikelySilent {
        speech_ratio: f64,
        minimum_ratio: f64,
    },
}

impl CheckFailure {
    /// Advisory findings never set `admissible = false`.
    pub fn is_advisory(&self) -> bool {
        matches!(self, CheckFailure::LikelySilent { .. })
    }
}

/// Measurements extracted from a successful decode.
///
/// Present independent of the admissibility outcome: a file can decode
/// cleanly and still fail the format or size checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioMetrics {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: usize,
    /// Largest absolute sample amplitude, 0.0-1.0.
    pub peak_amplitude: f32,
    /// RMS level over the whole signal, linear scale.
    pub rms_level: f32,
    /// Fraction of samples whose amplitude exceeds the silence threshold.
    pub speech_ratio: f64,
}

/// Outcome of validating one submission. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// True iff no blocking failure was recorded.
    pub admissible: bool,
    /// Every finding, in check order. Exhaustive: checks do not short-circuit.
    pub failures: Vec<CheckFailure>,
    /// Present iff decoding succeeded.
    pub metrics: Option<AudioMetrics>,
}

impl ValidationResult {
    /// Findings that block admissibility.
    pub fn blocking_failures(&self) -> impl Iterator<Item = &CheckFailure> {
        self.failures.iter().filter(|f| !f.is_advisory())
    }

    /// Advisory findings (reported, non-blocking).
    pub fn advisories(&self) -> impl Iterator<Item = &CheckFailure> {
        self.failures.iter().filter(|f| f.is_advisory())
    }
}
