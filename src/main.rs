//! stt-preflight - command-line admissibility checker
//!
//! Validates audio files against the configured limits before they are
//! handed to the transcription pipeline. Limits come from the environment
//! (`MAX_FILE_SIZE_MB`, `SUPPORTED_FORMATS`, `MIN_AUDIO_DURATION`,
//! `MIN_SAMPLE_RATE`, `MAX_SAMPLE_RATE`, `SILENCE_THRESHOLD`,
//! `MIN_SPEECH_RATIO`).
//!
//! Exit codes: 0 all files admissible, 1 at least one file rejected,
//! 2 at least one file unreadable (environment failure).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stt_preflight::{AdmissionValidator, SubmissionReport, ValidationConfig, ValidationResult};

/// Command-line arguments for stt-preflight
#[derive(Parser, Debug)]
#[command(name = "stt-preflight")]
#[command(about = "Pre-flight admissibility checks for speech-to-text uploads")]
#[command(version)]
struct Args {
    /// Audio files to validate
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit machine-readable JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FileOutcome {
    file: String,
    report: SubmissionReport,
    result: ValidationResult,
}

fn main() -> ExitCode {
    // Initialize tracing; diagnostics go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stt_preflight=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = ValidationConfig::from_env();
    let validator = AdmissionValidator::new(config);

    let mut outcomes = Vec::new();
    let mut any_inadmissible = false;
    let mut any_unreadable = false;

    for path in &args.files {
        let validated = validator
            .submission_for_path(path)
            .and_then(|submission| {
                let result = validator.validate(&submission)?;
                Ok((submission, result))
            });

        let (submission, result) = match validated {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                any_unreadable = true;
                continue;
            }
        };

        if !result.admissible {
            any_inadmissible = true;
        }

        if args.json {
            outcomes.push(FileOutcome {
                file: path.display().to_string(),
                report: SubmissionReport::for_submission(&submission),
                result,
            });
        } else {
            print_outcome(path, &result);
        }
    }

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&outcomes).context("failed to serialize results")?;
        println!("{}", rendered);
    }

    Ok(if any_unreadable {
        ExitCode::from(2)
    } else if any_inadmissible {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn print_outcome(path: &Path, result: &ValidationResult) {
    let verdict = if !result.admissible {
        "rejected"
    } else if result.advisories().next().is_some() {
        "admissible (with advisories)"
    } else {
        "admissible"
    };

    match &result.metrics {
        Some(m) => println!(
            "{}: {} ({:.2} s, {} Hz, {} channel{}, speech ratio {:.2})",
            path.display(),
            verdict,
            m.duration_seconds,
            m.sample_rate,
            m.channels,
            if m.channels == 1 { "" } else { "s" },
            m.speech_ratio,
        ),
        None => println!("{}: {}", path.display(), verdict),
    }

    for failure in &result.failures {
        println!("  - {}", failure);
    }
}
