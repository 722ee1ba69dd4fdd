//! Non-fatal findings returned alongside a successful result.
//!
//! Diagnostics never abort processing; they are accumulated by every stage
//! and surfaced to the caller even when the speech text was produced.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational (e.g. a symbol used without a definition in this session).
    Info,
    /// Something was degraded or repaired.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A command missing from the known-command table; rendered opaquely.
    UnknownCommand(String),
    /// Braces or brackets did not balance; the parser auto-closed them.
    UnbalancedDelimiter,
    /// `\begin{name}` without a matching `\end{name}`.
    UnterminatedEnvironment(String),
    /// `\end{name}` with no open environment.
    StrayEnd(String),
    /// A structure close that does not match the innermost open frame.
    MismatchedClose { expected: String, found: String },
    /// Structure stack exceeded its bound; the oldest frame was dropped.
    StructureOverflow,
    /// A symbol was defined again; the last definition wins.
    SymbolRedefined {
        symbol: String,
        previous: String,
        current: String,
    },
    /// A symbol was used but never defined in this session.
    UndefinedSymbol(String),
    /// The rewrite loop stopped on a pass or growth limit.
    RewriteLimit,
}

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        let severity = match kind {
            DiagnosticKind::UndefinedSymbol(_) => Severity::Info,
            _ => Severity::Warning,
        };
        let message = describe(&kind);
        Self {
            kind,
            severity,
            message,
        }
    }

    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnknownCommand(name.into()))
    }

    pub fn undefined_symbol(symbol: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UndefinedSymbol(symbol.into()))
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

fn describe(kind: &DiagnosticKind) -> String {
    match kind {
        DiagnosticKind::UnknownCommand(name) => {
            format!("unknown command \\{} was read out by name", name)
        }
        DiagnosticKind::UnbalancedDelimiter => {
            "unbalanced delimiters were closed automatically".to_string()
        }
        DiagnosticKind::UnterminatedEnvironment(name) => {
            format!("environment '{}' was not closed", name)
        }
        DiagnosticKind::StrayEnd(name) => format!("\\end{{{}}} has no matching \\begin", name),
        DiagnosticKind::MismatchedClose { expected, found } => {
            format!("tried to close '{}' but '{}' is open", expected, found)
        }
        DiagnosticKind::StructureOverflow => {
            "too many open document structures; the oldest was dropped".to_string()
        }
        DiagnosticKind::SymbolRedefined {
            symbol,
            previous,
            current,
        } => format!(
            "symbol '{}' redefined (was '{}', now '{}')",
            symbol, previous, current
        ),
        DiagnosticKind::UndefinedSymbol(symbol) => {
            format!("undefined symbol '{}'", symbol)
        }
        DiagnosticKind::RewriteLimit => {
            "rewriting stopped at its pass or growth limit".to_string()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_symbol_is_informational() {
        let d = Diagnostic::undefined_symbol("x");
        assert_eq!(d.severity, Severity::Info);
        assert_eq!(d.to_string(), "info: undefined symbol 'x'");
    }

    #[test]
    fn unknown_command_is_a_warning() {
        let d = Diagnostic::unknown_command("foo");
        assert!(d.is_warning());
        assert!(d.message.contains("\\foo"));
    }
}
