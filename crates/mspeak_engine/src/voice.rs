//! Voice-role hints and the text-to-speech collaborator boundary.
//!
//! The engine only ever produces text plus a [`VoiceRole`]; turning that into
//! audio is the job of a [`SpeechSynthesizer`] supplied by the front end.

use std::fmt;
use std::io::Write;

use mspeak_session::{ContextMemory, FrameState, StructureKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceRole {
    #[default]
    Narrator,
    TheoremAnnouncer,
    ProofNarrator,
    DefinitionVoice,
    Emphasis,
}

impl VoiceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceRole::Narrator => "narrator",
            VoiceRole::TheoremAnnouncer => "theorem_announcer",
            VoiceRole::ProofNarrator => "proof_narrator",
            VoiceRole::DefinitionVoice => "definition_voice",
            VoiceRole::Emphasis => "emphasis",
        }
    }

    fn for_structure(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Theorem
            | StructureKind::Lemma
            | StructureKind::Proposition
            | StructureKind::Corollary => VoiceRole::TheoremAnnouncer,
            StructureKind::Definition => VoiceRole::DefinitionVoice,
            StructureKind::Proof => VoiceRole::ProofNarrator,
            StructureKind::Example | StructureKind::Remark => VoiceRole::Narrator,
        }
    }
}

impl fmt::Display for VoiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the voice for one expression.
///
/// A boxed result is always emphasized. Otherwise a structure the expression
/// opens decides, then the innermost open frame of the session.
pub fn derive_voice_role(
    emphasized: bool,
    opened: Option<StructureKind>,
    memory: &ContextMemory,
) -> VoiceRole {
    if emphasized {
        return VoiceRole::Emphasis;
    }
    if let Some(kind) = opened {
        return VoiceRole::for_structure(kind);
    }
    memory
        .structures()
        .iter()
        .rev()
        .find(|frame| frame.state == FrameState::Open)
        .map_or(VoiceRole::Narrator, |frame| VoiceRole::for_structure(frame.kind))
}

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("failed to write speech output: {0}")]
    Io(#[from] std::io::Error),

    #[error("synthesizer rejected the text: {0}")]
    Rejected(String),
}

/// A text-to-speech backend. Implementations own every audio concern; the
/// engine never sees bytes or formats.
pub trait SpeechSynthesizer {
    fn speak(
        &self,
        text: &str,
        role: VoiceRole,
        sink: &mut dyn Write,
    ) -> Result<(), SynthesisError>;
}

/// Writes `[role] text` lines. Used by the CLI when no audio backend is
/// configured, and handy in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptSynthesizer;

impl SpeechSynthesizer for TranscriptSynthesizer {
    fn speak(
        &self,
        text: &str,
        role: VoiceRole,
        sink: &mut dyn Write,
    ) -> Result<(), SynthesisError> {
        if text.contains('\n') {
            return Err(SynthesisError::Rejected(
                "speech text must be a single line".to_string(),
            ));
        }
        writeln!(sink, "[{}] {}", role, text)?;
        Ok(())
    }
}
