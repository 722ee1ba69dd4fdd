use mspeak_guard::{DeadlineExceeded, SecurityViolation};
use mspeak_parser::ParseError;
use thiserror::Error;

/// Failure while building the rule tables.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("rule id '{0}' is registered twice")]
    DuplicateId(String),
}

/// Why a pipeline call produced no speech.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("input rejected: {0}")]
    Security(SecurityViolation),

    #[error("parse failed: {0}")]
    Parse(ParseError),

    #[error("rule tables unavailable: {0}")]
    Rules(#[from] RuleError),

    #[error("processing exceeded its budget ({elapsed_ms} ms of {budget_ms} ms)")]
    ProcessingTimeout { elapsed_ms: u64, budget_ms: u64 },
}

impl EngineError {
    /// Stable name for logs and machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Security(v) => v.kind(),
            EngineError::Parse(_) => "parse_error",
            EngineError::Rules(_) => "rule_error",
            EngineError::ProcessingTimeout { .. } => "processing_timeout",
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            EngineError::Security(v) => v.remediation(),
            EngineError::Parse(_) => "Check the expression for unbalanced braces or stray commands.",
            EngineError::Rules(_) => "Fix the rule table; this is a configuration problem, not an input problem.",
            EngineError::ProcessingTimeout { .. } => {
                "Split the expression into smaller parts or raise the time budget."
            }
        }
    }
}

impl From<SecurityViolation> for EngineError {
    fn from(v: SecurityViolation) -> Self {
        EngineError::Security(v)
    }
}

impl From<ParseError> for EngineError {
    fn from(e: ParseError) -> Self {
        match e {
            // The parser enforces the guard's depth limit; report it the same way.
            ParseError::TooDeeplyNested { depth, max } => {
                EngineError::Security(SecurityViolation::TooDeeplyNested { depth, max })
            }
            ParseError::Timeout { elapsed_ms } => EngineError::ProcessingTimeout {
                elapsed_ms,
                budget_ms: 0,
            },
            other => EngineError::Parse(other),
        }
    }
}

impl From<DeadlineExceeded> for EngineError {
    fn from(e: DeadlineExceeded) -> Self {
        EngineError::ProcessingTimeout {
            elapsed_ms: e.elapsed.as_millis() as u64,
            budget_ms: e.budget.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_depth_errors_surface_as_security_violations() {
        let err = EngineError::from(ParseError::TooDeeplyNested { depth: 60, max: 48 });
        assert!(matches!(
            err,
            EngineError::Security(SecurityViolation::TooDeeplyNested { depth: 60, max: 48 })
        ));
        assert_eq!(err.kind(), "too_deeply_nested");
    }

    #[test]
    fn parser_timeouts_surface_as_processing_timeouts() {
        let err = EngineError::from(ParseError::Timeout { elapsed_ms: 7 });
        assert_eq!(err.kind(), "processing_timeout");
        assert!(!err.remediation().is_empty());
    }
}
