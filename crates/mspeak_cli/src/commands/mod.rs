//! Subcommand handlers.

pub mod batch;
pub mod rules;
pub mod speak;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::ValueEnum;
use mspeak_engine::{
    EngineError, EngineResult, SpeechSynthesizer, TranscriptSynthesizer,
};

use crate::json_types::{ErrorJsonOutput, SpeakJsonOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Process exit code for a failed call.
pub fn exit_code(error: &EngineError) -> u8 {
    match error {
        EngineError::Security(_) => 2,
        EngineError::Parse(_) => 3,
        EngineError::ProcessingTimeout { .. } => 4,
        EngineError::Rules(_) => 1,
    }
}

/// Print one successful result in the requested format.
pub fn print_result(
    out: &mut dyn Write,
    input: &str,
    result: &EngineResult,
    format: OutputFormat,
    transcript: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(&SpeakJsonOutput::new(input, result))?)?;
        }
        OutputFormat::Text if transcript => {
            TranscriptSynthesizer.speak(&result.speech, result.voice_role, out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", result.speech)?;
            for warning in result.warnings.iter().filter(|w| w.is_warning()) {
                eprintln!("warning: {}", warning.message);
            }
        }
    }
    Ok(())
}

/// Print one failed call and return its exit code.
pub fn print_error(
    out: &mut dyn Write,
    input: &str,
    error: &EngineError,
    format: OutputFormat,
) -> Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(&ErrorJsonOutput::new(error, input))?)?;
        }
        OutputFormat::Text => {
            eprintln!("error: {}", error);
            eprintln!("hint: {}", error.remediation());
        }
    }
    Ok(ExitCode::from(exit_code(error)))
}
