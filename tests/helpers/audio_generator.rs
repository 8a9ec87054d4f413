//! Audio test file generation utilities
//!
//! Generates deterministic WAV files with known characteristics so the
//! admissibility checks can be exercised against real decodable audio:
//! sine tones at a chosen rate/channel count, silence, and corrupt files
//! that carry a plausible header but no decodable stream.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;

/// Generate a 16-bit PCM sine-wave WAV file.
///
/// `amplitude` is 0.0-1.0; 0.5 gives a healthy speech-like energy level.
pub fn generate_sine_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    sample_rate: u32,
    channels: u16,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    let amplitude_i16 = (amplitude * i16::MAX as f32) as i16;

    for frame_idx in 0..total_frames {
        let t = frame_idx as f32 / sample_rate as f32;
        let sample = ((2.0 * PI * frequency_hz * t).sin() * amplitude_i16 as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Generate a 16-bit PCM WAV file containing only silence.
pub fn generate_silent_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    sample_rate: u32,
    channels: u16,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let total_samples = (sample_rate as u64 * duration_ms) / 1000 * channels as u64;

    for _ in 0..total_samples {
        writer.write_sample(0i16)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Write a file that starts like a RIFF container but holds no decodable
/// audio stream (corrupted header case).
pub fn write_corrupt_wav<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    bytes.extend_from_slice(b"NOPE");
    bytes.extend((0..256u32).map(|i| (i % 251) as u8));
    std::fs::write(path, bytes)
}
