use mspeak_ast::DomainContext;
use serde::{Deserialize, Serialize};

use crate::structure::StructureKind;

/// A change one pipeline call wants to make to session memory.
///
/// Calls collect effects while they run and commit them in one step once the
/// call has succeeded, so a call that fails or times out leaves memory as it
/// found it. Effects are cached with the speech text and replayed on a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryEffect {
    Define { symbol: String, meaning: String },
    Reference { symbol: String },
    Open(StructureKind),
    Close(StructureKind),
    Topic(DomainContext),
}
