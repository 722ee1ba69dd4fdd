//! Document structure frames (theorem, proof, definition, ...).

use mspeak_ast::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Theorem,
    Lemma,
    Proposition,
    Corollary,
    Definition,
    Example,
    Remark,
    Proof,
}

impl StructureKind {
    pub const ALL: [StructureKind; 8] = [
        StructureKind::Theorem,
        StructureKind::Lemma,
        StructureKind::Proposition,
        StructureKind::Corollary,
        StructureKind::Definition,
        StructureKind::Example,
        StructureKind::Remark,
        StructureKind::Proof,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StructureKind::Theorem => "theorem",
            StructureKind::Lemma => "lemma",
            StructureKind::Proposition => "proposition",
            StructureKind::Corollary => "corollary",
            StructureKind::Definition => "definition",
            StructureKind::Example => "example",
            StructureKind::Remark => "remark",
            StructureKind::Proof => "proof",
        }
    }

    /// Everything except a proof states something.
    pub fn is_statement(self) -> bool {
        self != StructureKind::Proof
    }

    /// Theorem-like results that a proof may follow.
    pub fn is_result(self) -> bool {
        matches!(
            self,
            StructureKind::Theorem
                | StructureKind::Lemma
                | StructureKind::Proposition
                | StructureKind::Corollary
        )
    }

    /// Maps environment names and headings (`theorem`, `thm`, `Lemma*`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_end_matches('*').to_ascii_lowercase();
        let kind = match name.as_str() {
            "theorem" | "thm" => StructureKind::Theorem,
            "lemma" | "lem" => StructureKind::Lemma,
            "proposition" | "prop" => StructureKind::Proposition,
            "corollary" | "cor" => StructureKind::Corollary,
            "definition" | "defn" | "def" => StructureKind::Definition,
            "example" | "ex" => StructureKind::Example,
            "remark" | "rem" | "note" => StructureKind::Remark,
            "proof" | "pf" => StructureKind::Proof,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameState {
    Open,
    /// The statement is finished but its proof is still being read.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFrame {
    pub kind: StructureKind,
    /// Expression index that opened the frame.
    pub opened_at: u64,
    pub state: FrameState,
}

/// A close that does not match the innermost open frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot close {found}: {}", describe_top(.expected))]
pub struct MismatchedClose {
    /// Kind of the innermost frame, `None` if the stack was empty.
    pub expected: Option<StructureKind>,
    pub found: StructureKind,
}

fn describe_top(top: &Option<StructureKind>) -> String {
    match top {
        Some(kind) => format!("the innermost open structure is a {}", kind),
        None => "no structure is open".to_string(),
    }
}

impl MismatchedClose {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::MismatchedClose {
            expected: self
                .expected
                .map_or_else(|| "nothing".to_string(), |k| k.to_string()),
            found: self.found.to_string(),
        })
    }
}
