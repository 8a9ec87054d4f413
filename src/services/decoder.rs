//! Audio decoding via symphonia
//!
//! Decodes an uploaded file to mono f32 PCM so the metric checks (duration,
//! sample rate, speech presence) can all run off a single decode pass.
//!
//! Errors split two ways: `Open` means the environment failed (surfaced to
//! the caller as an infrastructure error), everything else means the bytes
//! are not decodable audio (reported as a content failure, not an error).

use std::path::{Path, PathBuf};

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

/// Decode failure, split by responsibility.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be opened (environment problem, not the upload's
    /// fault).
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes could not be parsed as audio.
    #[error("{0}")]
    Undecodable(String),
}

/// Decoded audio, mixed down to mono.
#[derive(Debug)]
pub struct DecodedAudio {
    /// Mono samples (f32, range [-1.0, 1.0]).
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count of the source before mixdown.
    pub channels: usize,
    /// Duration in seconds derived from the decoded frame count.
    pub duration_seconds: f64,
}

/// Decode an audio file to mono f32 PCM samples.
///
/// Probes the container format (the extension is only a hint), finds the
/// default audio track, decodes every packet, and averages channels to mono.
pub fn decode_audio_file(file_path: &Path) -> Result<DecodedAudio, DecodeError> {
    debug!(path = %file_path.display(), "Decoding audio file");

    let file = std::fs::File::open(file_path).map_err(|e| DecodeError::Open {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| DecodeError::Undecodable(format!("format probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::Undecodable("no audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| DecodeError::Undecodable("sample rate unknown".to_string()))?;
    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| DecodeError::Undecodable("channel layout unknown".to_string()))?;
    let channel_count = channels.count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Undecodable(format!("no decoder for codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                // End of stream
                break;
            }
            Err(e) => {
                return Err(DecodeError::Undecodable(format!("packet read failed: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| DecodeError::Undecodable(format!("packet decode failed: {}", e)))?;

        mix_to_mono(&decoded, &mut samples);
    }

    if samples.is_empty() {
        return Err(DecodeError::Undecodable("no audio frames decoded".to_string()));
    }

    let duration_seconds = samples.len() as f64 / sample_rate as f64;

    debug!(
        path = %file_path.display(),
        sample_rate = sample_rate,
        channels = channel_count,
        frames = samples.len(),
        duration_seconds = format!("{:.2}", duration_seconds),
        "Audio decoding complete"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels: channel_count,
        duration_seconds,
    })
}

/// Average all channels of a decoded buffer into mono and append to `out`.
fn mix_to_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    macro_rules! mix {
        ($buf:expr) => {{
            let channels = $buf.spec().channels.count();
            let frames = $buf.frames();
            out.reserve(frames);
            for frame in 0..frames {
                let mut sum = 0.0f32;
                for ch in 0..channels {
                    sum += f32::from_sample($buf.chan(ch)[frame]);
                }
                out.push(sum / channels as f32);
            }
        }};
    }

    match decoded {
        AudioBufferRef::U8(buf) => mix!(buf),
        AudioBufferRef::U16(buf) => mix!(buf),
        AudioBufferRef::U24(buf) => mix!(buf),
        AudioBufferRef::U32(buf) => mix!(buf),
        AudioBufferRef::S8(buf) => mix!(buf),
        AudioBufferRef::S16(buf) => mix!(buf),
        AudioBufferRef::S24(buf) => mix!(buf),
        AudioBufferRef::S32(buf) => mix!(buf),
        AudioBufferRef::F32(buf) => mix!(buf),
        AudioBufferRef::F64(buf) => mix!(buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn write_sine_wav(path: &Path, sample_rate: u32, channels: u16, duration_ms: u64) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let frames = (sample_rate as u64 * duration_ms) / 1000;
        for frame in 0..frames {
            let t = frame as f32 / sample_rate as f32;
            let sample = ((2.0 * PI * 440.0 * t).sin() * 0.5 * i16::MAX as f32) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_missing_file_is_open_error() {
        let result = decode_audio_file(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(DecodeError::Open { .. })));
    }

    #[test]
    fn test_decode_garbage_is_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"RIFFthis is not a wave file at all").unwrap();

        let result = decode_audio_file(&path);
        assert!(matches!(result, Err(DecodeError::Undecodable(_))));
    }

    #[test]
    fn test_decode_mono_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_sine_wav(&path, 16000, 1, 2000);

        let decoded = decode_audio_file(&path).unwrap();
        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.channels, 1);
        assert!((decoded.duration_seconds - 2.0).abs() < 0.05);
        assert_eq!(decoded.samples.len(), 32000);
    }

    #[test]
    fn test_decode_stereo_mixes_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_sine_wav(&path, 44100, 2, 500);

        let decoded = decode_audio_file(&path).unwrap();
        assert_eq!(decoded.channels, 2);
        // Mono mixdown: one sample per frame, not per channel.
        assert_eq!(decoded.samples.len(), 22050);
    }
}
