//! Environment-driven configuration resolution tests
//!
//! Note: uses the serial_test crate to prevent ENV variable race conditions.
//! Every test here manipulates process-wide environment variables and is
//! marked #[serial] so they run sequentially, not in parallel.

use serial_test::serial;
use stt_preflight::{AudioFormat, ValidationConfig};

const VARS: [&str; 7] = [
    "MAX_FILE_SIZE_MB",
    "SUPPORTED_FORMATS",
    "MIN_AUDIO_DURATION",
    "MIN_SAMPLE_RATE",
    "MAX_SAMPLE_RATE",
    "SILENCE_THRESHOLD",
    "MIN_SPEECH_RATIO",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_environment_unset() {
    clear_env();

    let config = ValidationConfig::from_env();

    assert_eq!(config.max_file_size_mb, 100);
    assert_eq!(config.min_audio_duration_sec, 0.5);
    assert_eq!(config.min_sample_rate_hz, 8000);
    assert_eq!(config.max_sample_rate_hz, 48000);
    assert_eq!(config.silence_threshold, 0.01);
    assert_eq!(config.min_speech_ratio, 0.1);
    assert_eq!(config.supported_formats.len(), AudioFormat::ALL.len());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    std::env::set_var("MAX_FILE_SIZE_MB", "25");
    std::env::set_var("SUPPORTED_FORMATS", "wav,flac");
    std::env::set_var("MIN_AUDIO_DURATION", "1.5");
    std::env::set_var("MIN_SAMPLE_RATE", "16000");
    std::env::set_var("MAX_SAMPLE_RATE", "44100");
    std::env::set_var("SILENCE_THRESHOLD", "0.02");
    std::env::set_var("MIN_SPEECH_RATIO", "0.25");

    let config = ValidationConfig::from_env();

    assert_eq!(config.max_file_size_mb, 25);
    assert_eq!(config.max_file_size_bytes(), 25_000_000);
    assert_eq!(config.min_audio_duration_sec, 1.5);
    assert_eq!(config.min_sample_rate_hz, 16000);
    assert_eq!(config.max_sample_rate_hz, 44100);
    assert_eq!(config.silence_threshold, 0.02);
    assert_eq!(config.min_speech_ratio, 0.25);
    assert_eq!(config.supported_formats.len(), 2);
    assert!(config.supported_formats.contains(&AudioFormat::Wav));
    assert!(config.supported_formats.contains(&AudioFormat::Flac));

    clear_env();
}

#[test]
#[serial]
fn test_malformed_values_keep_defaults() {
    clear_env();
    std::env::set_var("MAX_FILE_SIZE_MB", "lots");
    std::env::set_var("MIN_SAMPLE_RATE", "8kHz");
    std::env::set_var("SILENCE_THRESHOLD", "");

    let config = ValidationConfig::from_env();

    assert_eq!(config.max_file_size_mb, 100);
    assert_eq!(config.min_sample_rate_hz, 8000);
    assert_eq!(config.silence_threshold, 0.01);

    clear_env();
}

#[test]
#[serial]
fn test_unrecognized_formats_keep_default_set() {
    clear_env();
    std::env::set_var("SUPPORTED_FORMATS", "webm,xyz");

    let config = ValidationConfig::from_env();

    assert_eq!(config.supported_formats.len(), AudioFormat::ALL.len());

    clear_env();
}

#[test]
#[serial]
fn test_inverted_sample_rate_range_reverts_to_defaults() {
    clear_env();
    std::env::set_var("MIN_SAMPLE_RATE", "48000");
    std::env::set_var("MAX_SAMPLE_RATE", "8000");

    let config = ValidationConfig::from_env();

    assert_eq!(config.min_sample_rate_hz, 8000);
    assert_eq!(config.max_sample_rate_hz, 48000);

    clear_env();
}
