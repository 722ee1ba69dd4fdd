//! Expression-to-speech engine.
//!
//! Turns LaTeX into natural spoken English. The rule tables live in
//! [`rules`], one module per mathematical domain; [`SpeechEngine`] runs the
//! full pipeline against a per-session [`ContextMemory`].
//!
//! ```no_run
//! use mspeak_engine::{EngineConfig, Expression, SpeechEngine};
//! use mspeak_session::ContextMemory;
//!
//! let engine = SpeechEngine::new(EngineConfig::default())?;
//! let mut memory = ContextMemory::new();
//! let result = engine.process(&Expression::new(r"\frac{1}{2}"), &mut memory)?;
//! assert_eq!(result.speech, "one half");
//! # Ok::<(), mspeak_engine::EngineError>(())
//! ```
//!
//! [`ContextMemory`]: mspeak_session::ContextMemory

pub mod applier;
pub mod config;
pub mod detector;
pub mod enhancer;
pub mod error;
pub mod features;
pub mod macros;
pub mod numbers;
pub mod pattern;
pub mod pipeline;
pub mod repository;
pub mod rules;
pub mod scanner;
pub mod symbols;
pub mod voice;

pub use applier::{apply, RuleOutcome};
pub use config::{CacheSettings, EngineConfig, RewriteLimits};
pub use detector::{select_rules, Selection};
pub use enhancer::enhance;
pub use error::{EngineError, RuleError};
pub use pattern::{Captures, Matcher, Pattern, Priority, PriorityTier, Replacement};
pub use pipeline::{CachedSpeech, EngineResult, SpeechEngine};
pub use repository::{OrderedRuleSet, RuleRepository, RuleSetBuilder};
pub use voice::{derive_voice_role, SpeechSynthesizer, SynthesisError, TranscriptSynthesizer, VoiceRole};

pub use mspeak_ast::{AudienceLevel, Diagnostic, DiagnosticKind, DomainContext, Expression, Subcontext};
