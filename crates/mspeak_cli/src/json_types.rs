//! JSON output types for `--format json`.
//!
//! Every document carries `schema_version`; bump it when a field changes
//! meaning or disappears. Adding fields does not require a bump.

use mspeak_ast::Diagnostic;
use mspeak_engine::{EngineError, EngineResult};
use serde::Serialize;

pub const SCHEMA_VERSION: u32 = 1;

/// Result of speaking one expression
#[derive(Serialize, Debug)]
pub struct SpeakJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub input: String,
    pub speech: String,
    pub domain: String,
    pub subcontext: String,
    pub voice_role: String,
    pub unknown_commands: Vec<String>,
    pub warnings: Vec<WarningJson>,
    pub applied_rules: Vec<String>,
    pub cache_hit: bool,
    pub time_us: u64,
}

impl SpeakJsonOutput {
    pub fn new(input: &str, result: &EngineResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: true,
            input: input.to_string(),
            speech: result.speech.clone(),
            domain: result.domain.to_string(),
            subcontext: result.subcontext.topic().to_string(),
            voice_role: result.voice_role.to_string(),
            unknown_commands: result.unknown_commands.clone(),
            warnings: result.warnings.iter().map(WarningJson::from).collect(),
            applied_rules: result.applied_rules.clone(),
            cache_hit: result.cache_hit,
            time_us: result.processing_time.as_micros() as u64,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct WarningJson {
    pub severity: String,
    pub message: String,
}

impl From<&Diagnostic> for WarningJson {
    fn from(d: &Diagnostic) -> Self {
        Self {
            severity: format!("{:?}", d.severity).to_ascii_lowercase(),
            message: d.message.clone(),
        }
    }
}

/// An error result
#[derive(Serialize, Debug)]
pub struct ErrorJsonOutput {
    pub schema_version: u32,
    pub ok: bool,
    pub kind: String,
    pub error: String,
    pub remediation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl ErrorJsonOutput {
    pub fn new(error: &EngineError, input: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: false,
            kind: error.kind().to_string(),
            error: error.to_string(),
            remediation: error.remediation().to_string(),
            input: Some(input.to_string()),
        }
    }
}

/// One entry of `mspeak rules`
#[derive(Serialize, Debug)]
pub struct RuleJson {
    pub id: String,
    pub domain: String,
    pub priority: i32,
    pub tier: String,
    pub description: String,
}
