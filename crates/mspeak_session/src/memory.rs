//! Session-scoped semantic memory.

use std::collections::BTreeMap;

use mspeak_ast::{Diagnostic, DiagnosticKind, DomainContext};
use serde::{Deserialize, Serialize};

use crate::effects::MemoryEffect;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::structure::{FrameState, MismatchedClose, StructureFrame, StructureKind};

/// Maximum number of open structure frames kept per session.
pub const MAX_STRUCTURE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub meaning: String,
    /// Expression index of the most recent definition.
    pub defined_at: u64,
    pub ref_count: u64,
}

/// Symbols, document structure and topic for one session.
///
/// Owned by exactly one session and passed by `&mut` into each pipeline
/// call, which serializes calls on it. Nothing is ever deleted except by
/// [`ContextMemory::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMemory {
    symbols: BTreeMap<String, SymbolEntry>,
    structures: Vec<StructureFrame>,
    topic: Option<DomainContext>,
    expressions: u64,
}

impl ContextMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine `symbol`. A redefinition with a different meaning
    /// wins and is reported as a diagnostic.
    pub fn define(&mut self, symbol: &str, meaning: &str, at_index: u64) -> Option<Diagnostic> {
        match self.symbols.get_mut(symbol) {
            Some(entry) => {
                let previous = std::mem::replace(&mut entry.meaning, meaning.to_string());
                entry.defined_at = at_index;
                if previous == meaning {
                    return None;
                }
                tracing::warn!(
                    symbol,
                    previous = %previous,
                    current = meaning,
                    "symbol redefined"
                );
                Some(Diagnostic::new(DiagnosticKind::SymbolRedefined {
                    symbol: symbol.to_string(),
                    previous,
                    current: meaning.to_string(),
                }))
            }
            None => {
                tracing::debug!(symbol, meaning, at_index, "symbol defined");
                self.symbols.insert(
                    symbol.to_string(),
                    SymbolEntry {
                        meaning: meaning.to_string(),
                        defined_at: at_index,
                        ref_count: 0,
                    },
                );
                None
            }
        }
    }

    pub fn lookup(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.symbols.get(symbol)
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Count a use of `symbol`. Returns whether it was defined.
    pub fn record_reference(&mut self, symbol: &str) -> bool {
        match self.symbols.get_mut(symbol) {
            Some(entry) => {
                entry.ref_count += 1;
                true
            }
            None => false,
        }
    }

    /// Push a frame. A new statement ends a statement frame on top of the
    /// stack; a proof marks the statement it follows as finished but keeps it
    /// until the proof closes.
    pub fn open_structure(&mut self, kind: StructureKind, at_index: u64) -> Option<Diagnostic> {
        if kind.is_statement() {
            if let Some(top) = self.structures.last() {
                if top.kind.is_statement() {
                    tracing::debug!(ended = %top.kind, "statement ended by a new one");
                    self.structures.pop();
                }
            }
        } else if let Some(top) = self.structures.last_mut() {
            if top.kind.is_statement() && top.state == FrameState::Open {
                top.state = FrameState::Closed;
            }
        }

        self.structures.push(StructureFrame {
            kind,
            opened_at: at_index,
            state: FrameState::Open,
        });

        if self.structures.len() > MAX_STRUCTURE_DEPTH {
            let dropped = self.structures.remove(0);
            tracing::warn!(kind = %dropped.kind, "structure stack overflow");
            return Some(Diagnostic::new(DiagnosticKind::StructureOverflow));
        }
        None
    }

    /// Pop the innermost frame if it has the given kind. On mismatch the
    /// stack is left untouched.
    pub fn close_structure(&mut self, kind: StructureKind) -> Result<(), MismatchedClose> {
        let top = self.structures.last().map(|f| f.kind);
        if top != Some(kind) {
            tracing::warn!(?top, found = %kind, "mismatched structure close");
            return Err(MismatchedClose {
                expected: top,
                found: kind,
            });
        }
        self.structures.pop();
        // The statement a proof belonged to ends with the proof.
        while self
            .structures
            .last()
            .is_some_and(|f| f.state == FrameState::Closed)
        {
            self.structures.pop();
        }
        Ok(())
    }

    /// Innermost open frame.
    pub fn current_structure(&self) -> Option<&StructureFrame> {
        self.structures.last()
    }

    pub fn structures(&self) -> &[StructureFrame] {
        &self.structures
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn current_topic(&self) -> Option<DomainContext> {
        self.topic
    }

    pub fn set_topic(&mut self, domain: DomainContext) {
        self.topic = if domain.is_general() {
            None
        } else {
            Some(domain)
        };
    }

    /// Number of expressions committed so far; also the index the next
    /// expression will be recorded under.
    pub fn expression_count(&self) -> u64 {
        self.expressions
    }

    pub fn reset(&mut self) {
        tracing::debug!(symbols = self.symbols.len(), "context memory reset");
        *self = Self::default();
    }

    /// Digest of symbols and their meanings, the structure stack and the
    /// topic. Reference counts and indices are left out so that re-reading an
    /// expression in an unchanged context produces the same key.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut builder = FingerprintBuilder::new();
        builder.section(b's');
        for (symbol, entry) in &self.symbols {
            builder.field(symbol).field(&entry.meaning);
        }
        builder.section(b'f');
        for frame in &self.structures {
            builder.field(frame.kind.as_str()).field(match frame.state {
                FrameState::Open => "open",
                FrameState::Closed => "closed",
            });
        }
        builder.section(b't');
        builder.field(self.topic.map_or("", |t| t.as_str()));
        builder.finish()
    }

    /// Commit the effects of one successful call and advance the expression
    /// counter. Returns the diagnostics produced while committing.
    pub fn apply_effects(&mut self, effects: &[MemoryEffect]) -> Vec<Diagnostic> {
        let index = self.expressions;
        let mut diagnostics = Vec::new();
        for effect in effects {
            match effect {
                MemoryEffect::Define { symbol, meaning } => {
                    diagnostics.extend(self.define(symbol, meaning, index));
                }
                MemoryEffect::Reference { symbol } => {
                    self.record_reference(symbol);
                }
                MemoryEffect::Open(kind) => {
                    diagnostics.extend(self.open_structure(*kind, index));
                }
                MemoryEffect::Close(kind) => {
                    if let Err(e) = self.close_structure(*kind) {
                        diagnostics.push(e.to_diagnostic());
                    }
                }
                MemoryEffect::Topic(domain) => self.set_topic(*domain),
            }
        }
        self.expressions += 1;
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redefinition_wins_and_is_reported() {
        let mut memory = ContextMemory::new();
        assert!(memory.define("x", "5", 0).is_none());
        let diag = memory.define("x", "7", 3).expect("redefinition diagnostic");
        assert!(matches!(diag.kind, DiagnosticKind::SymbolRedefined { .. }));
        let entry = memory.lookup("x").unwrap();
        assert_eq!(entry.meaning, "7");
        assert_eq!(entry.defined_at, 3);
    }

    #[test]
    fn identical_redefinition_is_silent() {
        let mut memory = ContextMemory::new();
        memory.define("f", "a function", 0);
        assert!(memory.define("f", "a function", 1).is_none());
    }

    #[test]
    fn references_are_counted_for_defined_symbols_only() {
        let mut memory = ContextMemory::new();
        memory.define("x", "5", 0);
        assert!(memory.record_reference("x"));
        assert!(memory.record_reference("x"));
        assert!(!memory.record_reference("y"));
        assert_eq!(memory.lookup("x").unwrap().ref_count, 2);
        assert!(memory.lookup("y").is_none());
    }

    #[test]
    fn mismatched_close_leaves_stack_untouched() {
        let mut memory = ContextMemory::new();
        memory.open_structure(StructureKind::Theorem, 0);
        let before = memory.structures().to_vec();
        let err = memory.close_structure(StructureKind::Proof).unwrap_err();
        assert_eq!(err.expected, Some(StructureKind::Theorem));
        assert_eq!(memory.structures(), before.as_slice());
    }

    #[test]
    fn closing_a_proof_ends_its_theorem() {
        let mut memory = ContextMemory::new();
        memory.open_structure(StructureKind::Theorem, 0);
        memory.open_structure(StructureKind::Proof, 1);
        assert_eq!(memory.structures()[0].state, FrameState::Closed);
        assert_eq!(memory.current_structure().unwrap().kind, StructureKind::Proof);

        memory.close_structure(StructureKind::Proof).unwrap();
        assert!(memory.structures().is_empty());
    }

    #[test]
    fn a_new_statement_replaces_the_previous_one() {
        let mut memory = ContextMemory::new();
        memory.open_structure(StructureKind::Definition, 0);
        memory.open_structure(StructureKind::Lemma, 1);
        assert_eq!(memory.structures().len(), 1);
        assert_eq!(memory.structures()[0].kind, StructureKind::Lemma);
    }

    #[test]
    fn stack_is_bounded() {
        let mut memory = ContextMemory::new();
        let mut overflowed = false;
        for i in 0..(MAX_STRUCTURE_DEPTH as u64 + 1) {
            overflowed |= memory.open_structure(StructureKind::Proof, i).is_some();
        }
        assert!(overflowed);
        assert_eq!(memory.structures().len(), MAX_STRUCTURE_DEPTH);
    }

    #[test]
    fn fingerprint_ignores_reference_counts() {
        let mut memory = ContextMemory::new();
        memory.define("x", "5", 0);
        let before = memory.fingerprint();
        memory.record_reference("x");
        assert_eq!(memory.fingerprint(), before);

        memory.define("y", "2", 1);
        assert_ne!(memory.fingerprint(), before);
    }

    #[test]
    fn general_topic_clears_the_hint() {
        let mut memory = ContextMemory::new();
        memory.set_topic(DomainContext::Calculus);
        assert_eq!(memory.current_topic(), Some(DomainContext::Calculus));
        memory.set_topic(DomainContext::General);
        assert_eq!(memory.current_topic(), None);
    }

    #[test]
    fn effects_commit_in_order_and_advance_the_index() {
        let mut memory = ContextMemory::new();
        let diags = memory.apply_effects(&[
            MemoryEffect::Define {
                symbol: "x".into(),
                meaning: "5".into(),
            },
            MemoryEffect::Reference { symbol: "x".into() },
            MemoryEffect::Close(StructureKind::Proof),
        ]);
        assert_eq!(diags.len(), 1);
        assert!(matches!(diags[0].kind, DiagnosticKind::MismatchedClose { .. }));
        assert_eq!(memory.expression_count(), 1);
        assert_eq!(memory.lookup("x").unwrap().ref_count, 1);

        memory.reset();
        assert_eq!(memory, ContextMemory::new());
    }
}
