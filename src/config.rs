//! Validation limits, resolved from the process environment
//!
//! Every limit has a documented default; unset variables keep the default
//! and malformed values are logged and ignored rather than aborting startup.

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use tracing::{info, warn};

use crate::types::AudioFormat;

/// Limits applied by the admissibility validator.
///
/// Read-only after load; concurrent validations share it without locking.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationConfig {
    /// Maximum upload size in decimal megabytes (x 1,000,000 bytes).
    pub max_file_size_mb: u64,
    /// Formats accepted for submission.
    pub supported_formats: HashSet<AudioFormat>,
    /// Minimum decoded duration in seconds.
    pub min_audio_duration_sec: f64,
    /// Lowest acceptable sample rate in Hz.
    pub min_sample_rate_hz: u32,
    /// Highest acceptable sample rate in Hz.
    pub max_sample_rate_hz: u32,
    /// Amplitude below which a sample counts as silent.
    pub silence_threshold: f32,
    /// Minimum active-sample ratio before the silence advisory fires.
    pub min_speech_ratio: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            supported_formats: AudioFormat::ALL.iter().copied().collect(),
            min_audio_duration_sec: 0.5,
            min_sample_rate_hz: 8000,
            max_sample_rate_hz: 48000,
            silence_threshold: 0.01,
            min_speech_ratio: 0.1,
        }
    }
}

impl ValidationConfig {
    /// Resolve configuration from environment variables.
    ///
    /// Recognized variables: `MAX_FILE_SIZE_MB`, `SUPPORTED_FORMATS`
    /// (comma-separated extensions), `MIN_AUDIO_DURATION`, `MIN_SAMPLE_RATE`,
    /// `MAX_SAMPLE_RATE`, `SILENCE_THRESHOLD`, `MIN_SPEECH_RATIO`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parsed("MAX_FILE_SIZE_MB") {
            config.max_file_size_mb = v;
        }
        if let Some(v) = env_parsed("MIN_AUDIO_DURATION") {
            config.min_audio_duration_sec = v;
        }
        if let Some(v) = env_parsed("MIN_SAMPLE_RATE") {
            config.min_sample_rate_hz = v;
        }
        if let Some(v) = env_parsed("MAX_SAMPLE_RATE") {
            config.max_sample_rate_hz = v;
        }
        if let Some(v) = env_parsed("SILENCE_THRESHOLD") {
            config.silence_threshold = v;
        }
        if let Some(v) = env_parsed("MIN_SPEECH_RATIO") {
            config.min_speech_ratio = v;
        }
        if let Ok(raw) = std::env::var("SUPPORTED_FORMATS") {
            if let Some(formats) = parse_format_list(&raw) {
                config.supported_formats = formats;
            }
        }

        if config.min_sample_rate_hz > config.max_sample_rate_hz {
            warn!(
                "MIN_SAMPLE_RATE {} exceeds MAX_SAMPLE_RATE {}; using defaults for both",
                config.min_sample_rate_hz, config.max_sample_rate_hz
            );
            let defaults = Self::default();
            config.min_sample_rate_hz = defaults.min_sample_rate_hz;
            config.max_sample_rate_hz = defaults.max_sample_rate_hz;
        }

        info!(
            max_file_size_mb = config.max_file_size_mb,
            supported_formats = %config.supported_formats_label(),
            "Validation limits resolved"
        );

        config
    }

    /// Size limit in bytes (decimal megabytes).
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1_000_000
    }

    /// Supported formats as a stable, human-readable list.
    pub fn supported_formats_label(&self) -> String {
        AudioFormat::ALL
            .iter()
            .filter(|f| self.supported_formats.contains(f))
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Read and parse one environment variable, warning on malformed values.
fn env_parsed<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

/// Parse a comma-separated format list ("wav,mp3,.flac").
///
/// Unrecognized entries are logged and skipped. Returns `None` when nothing
/// usable remains, so the caller keeps the default set.
fn parse_format_list(raw: &str) -> Option<HashSet<AudioFormat>> {
    let mut formats = HashSet::new();

    for token in raw.split(',') {
        let token = token.trim().trim_start_matches('.');
        if token.is_empty() {
            continue;
        }
        match AudioFormat::from_extension(token) {
            Some(format) => {
                formats.insert(format);
            }
            None => warn!("Ignoring unrecognized format {:?} in SUPPORTED_FORMATS", token),
        }
    }

    if formats.is_empty() {
        warn!("SUPPORTED_FORMATS contained no recognized formats; keeping defaults");
        return None;
    }
    Some(formats)
}
