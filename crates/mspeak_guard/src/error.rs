use std::fmt;
use thiserror::Error;

/// Which expansion-bomb heuristic fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BombReason {
    RiskyCommandCount { command: String, count: usize },
    NestedRiskyCommands { streak: usize },
    ScriptCount { scripts: usize },
    ScriptDensity { scripts: usize, chars: usize },
    RepeatedCharacter { ch: char, run: usize },
    RepeatedCommand { command: String, run: usize },
}

impl fmt::Display for BombReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BombReason::RiskyCommandCount { command, count } => {
                write!(f, "{} occurrences of \\{}", count, command)
            }
            BombReason::NestedRiskyCommands { streak } => {
                write!(f, "{} nested fraction-like commands", streak)
            }
            BombReason::ScriptCount { scripts } => write!(f, "{} sub/superscripts", scripts),
            BombReason::ScriptDensity { scripts, chars } => {
                write!(f, "{} sub/superscripts in {} characters", scripts, chars)
            }
            BombReason::RepeatedCharacter { ch, run } => {
                write!(f, "'{}' repeated {} times", ch, run)
            }
            BombReason::RepeatedCommand { command, run } => {
                write!(f, "\\{} repeated {} times in a row", command, run)
            }
        }
    }
}

/// Input rejected by the resource guard. Never retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityViolation {
    #[error("input is empty")]
    EmptyInput,
    #[error("input is {len} bytes long (limit {max})")]
    TooLong { len: usize, max: usize },
    #[error("input uses the forbidden command \\{command}")]
    DangerousConstruct { command: String },
    #[error("input nests {depth} levels deep (limit {max})")]
    TooDeeplyNested { depth: usize, max: usize },
    #[error("input looks like an expansion bomb: {reason}")]
    ExpansionBombSuspected { reason: BombReason },
    #[error("input has {open} opening and {close} closing braces")]
    MalformedInput { open: usize, close: usize },
}

impl SecurityViolation {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SecurityViolation::EmptyInput => "empty_input",
            SecurityViolation::TooLong { .. } => "too_long",
            SecurityViolation::DangerousConstruct { .. } => "dangerous_construct",
            SecurityViolation::TooDeeplyNested { .. } => "too_deeply_nested",
            SecurityViolation::ExpansionBombSuspected { .. } => "expansion_bomb_suspected",
            SecurityViolation::MalformedInput { .. } => "malformed_input",
        }
    }

    /// Short suggestion shown to the user next to the error.
    pub fn remediation(&self) -> &'static str {
        match self {
            SecurityViolation::EmptyInput => "Provide a LaTeX expression to read.",
            SecurityViolation::TooLong { .. } => {
                "Split the input into smaller expressions and read them one at a time."
            }
            SecurityViolation::DangerousConstruct { .. } => {
                "Remove file access and macro definition commands; only math notation is read."
            }
            SecurityViolation::TooDeeplyNested { .. } => {
                "Reduce the nesting of braces, brackets and parentheses."
            }
            SecurityViolation::ExpansionBombSuspected { .. } => {
                "Simplify the expression; it repeats or nests the same construct too often."
            }
            SecurityViolation::MalformedInput { .. } => {
                "Check that every opening brace has a matching closing brace."
            }
        }
    }
}
