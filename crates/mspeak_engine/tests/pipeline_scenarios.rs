//! End-to-end scenarios through `SpeechEngine::process`.

use std::time::{Duration, Instant};

use mspeak_ast::{
    AudienceLevel, CalculusTopic, DiagnosticKind, DomainContext, Expression, Subcontext,
};
use mspeak_engine::{EngineConfig, EngineError, SpeechEngine, VoiceRole};
use mspeak_session::{ContextMemory, FrameState, StructureKind};

fn engine() -> SpeechEngine {
    SpeechEngine::new(EngineConfig::default()).expect("default rules compile")
}

fn uncached() -> SpeechEngine {
    let mut config = EngineConfig::default();
    config.cache.enabled = false;
    SpeechEngine::new(config).expect("default rules compile")
}

#[test]
fn simple_fraction_is_general_and_spoken_in_words() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"\frac{1}{2}"), &mut memory)
        .unwrap();
    assert_eq!(r.speech, "one half");
    assert_eq!(r.domain, DomainContext::General);
    assert_eq!(r.subcontext, Subcontext::General);
    assert_eq!(r.voice_role, VoiceRole::Narrator);
    assert!(r.warnings.is_empty(), "{:?}", r.warnings);
}

#[test]
fn definite_integral_reads_bounds_body_and_differential() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"\int_0^1 x^2 dx"), &mut memory)
        .unwrap();
    assert_eq!(r.domain, DomainContext::Calculus);
    assert_eq!(r.subcontext, Subcontext::Calculus(CalculusTopic::Integrals));
    assert!(
        r.speech.contains("integral from 0 to 1 of x squared"),
        "{}",
        r.speech
    );
    assert!(r.speech.contains("d x"), "{}", r.speech);
    assert!(!r.speech.contains('\\'), "{}", r.speech);
}

#[test]
fn defined_symbols_are_not_reported_later() {
    let engine = uncached();
    let mut memory = ContextMemory::new();
    engine
        .process(&Expression::new("let x = 5"), &mut memory)
        .unwrap();
    let r = engine
        .process(&Expression::new("x + 1"), &mut memory)
        .unwrap();
    assert!(!r
        .warnings
        .iter()
        .any(|d| matches!(&d.kind, DiagnosticKind::UndefinedSymbol(s) if s == "x")));
    assert_eq!(memory.lookup("x").unwrap().ref_count, 1);

    let mut fresh = ContextMemory::new();
    let r = engine
        .process(&Expression::new("x + 1"), &mut fresh)
        .unwrap();
    assert!(r
        .warnings
        .iter()
        .any(|d| matches!(&d.kind, DiagnosticKind::UndefinedSymbol(s) if s == "x")));
}

#[test]
fn fraction_bomb_is_rejected_quickly() {
    let engine = engine();
    let mut memory = ContextMemory::new();
    let bomb = r"\frac".repeat(200);
    let started = Instant::now();
    let err = engine
        .process(&Expression::new(bomb), &mut memory)
        .unwrap_err();
    assert!(started.elapsed() < Duration::from_millis(50));
    assert_eq!(err.kind(), "expansion_bomb_suspected");
    assert!(matches!(err, EngineError::Security(_)));
    assert_eq!(memory.expression_count(), 0);
}

#[test]
fn zero_budget_times_out_without_side_effects() {
    let mut config = EngineConfig::default();
    config.timeout_ms = 0;
    let engine = SpeechEngine::new(config).unwrap();
    let mut memory = ContextMemory::new();
    let err = engine
        .process(&Expression::new("let x = 5"), &mut memory)
        .unwrap_err();
    assert_eq!(err.kind(), "processing_timeout");
    assert_eq!(memory, ContextMemory::new());
    assert_eq!(engine.cache().unwrap().len(), 0);
}

#[test]
fn proofs_use_the_proof_voice_and_close_their_statement() {
    let engine = uncached();
    let mut memory = ContextMemory::new();
    let theorem = engine
        .process(
            &Expression::new(r"\begin{theorem} x^2 \geq 0 \end{theorem}"),
            &mut memory,
        )
        .unwrap();
    assert_eq!(theorem.voice_role, VoiceRole::TheoremAnnouncer);
    assert_eq!(memory.current_structure().unwrap().kind, StructureKind::Theorem);

    let step = engine
        .process(&Expression::new(r"\text{Proof.} x \cdot x = x^2"), &mut memory)
        .unwrap();
    assert_eq!(step.voice_role, VoiceRole::ProofNarrator);

    let end = engine
        .process(&Expression::new(r"x^2 \geq 0 \qed"), &mut memory)
        .unwrap();
    assert_eq!(end.voice_role, VoiceRole::ProofNarrator);
    assert!(memory.structures().is_empty());
}

fn stack(memory: &ContextMemory) -> Vec<(StructureKind, FrameState)> {
    memory.structures().iter().map(|f| (f.kind, f.state)).collect()
}

#[test]
fn proof_written_over_several_lines_stays_open_until_its_end() {
    let engine = uncached();
    let mut memory = ContextMemory::new();

    let theorem = engine
        .process(
            &Expression::new(r"\begin{theorem} x^2 \geq 0 \end{theorem}"),
            &mut memory,
        )
        .unwrap();
    assert_eq!(theorem.voice_role, VoiceRole::TheoremAnnouncer);
    assert_eq!(stack(&memory), vec![(StructureKind::Theorem, FrameState::Open)]);

    let begin = engine
        .process(&Expression::new(r"\begin{proof}"), &mut memory)
        .unwrap();
    assert_eq!(begin.voice_role, VoiceRole::ProofNarrator);
    assert_eq!(
        stack(&memory),
        vec![
            (StructureKind::Theorem, FrameState::Closed),
            (StructureKind::Proof, FrameState::Open)
        ]
    );

    let step = engine
        .process(&Expression::new(r"x \cdot x = x^2"), &mut memory)
        .unwrap();
    assert_eq!(step.voice_role, VoiceRole::ProofNarrator);
    assert_eq!(memory.current_structure().unwrap().kind, StructureKind::Proof);

    let end = engine
        .process(&Expression::new(r"\end{proof}"), &mut memory)
        .unwrap();
    assert_eq!(end.voice_role, VoiceRole::ProofNarrator);
    assert!(memory.structures().is_empty());
    assert!(!end.warnings.iter().any(|d| matches!(
        d.kind,
        DiagnosticKind::StrayEnd(_) | DiagnosticKind::MismatchedClose { .. }
    )));

    let after = engine
        .process(&Expression::new("x + 1"), &mut memory)
        .unwrap();
    assert_eq!(after.voice_role, VoiceRole::Narrator);
}

#[test]
fn lone_end_of_proof_outside_a_proof_is_still_reported() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"\end{proof}"), &mut memory)
        .unwrap();
    assert!(r
        .warnings
        .iter()
        .any(|d| matches!(&d.kind, DiagnosticKind::StrayEnd(env) if env == "proof")));
    assert!(memory.structures().is_empty());
}

#[test]
fn boxed_results_are_emphasized() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"\boxed{x = 2}"), &mut memory)
        .unwrap();
    assert_eq!(r.voice_role, VoiceRole::Emphasis);
    assert_eq!(r.speech, "x equals 2");
}

#[test]
fn stray_close_is_reported_not_fatal() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"x = 1 \qed"), &mut memory)
        .unwrap();
    assert!(r
        .warnings
        .iter()
        .any(|d| matches!(d.kind, DiagnosticKind::MismatchedClose { .. })));
}

#[test]
fn hint_overrides_detection_and_sets_the_topic() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(
            &Expression::new("x + y").with_domain_hint(Some(DomainContext::Topology)),
            &mut memory,
        )
        .unwrap();
    assert_eq!(r.domain, DomainContext::Topology);
    assert_eq!(memory.current_topic(), Some(DomainContext::Topology));
}

#[test]
fn audience_changes_vocabulary_only() {
    let engine = uncached();
    let latex = r"\lim_{x \to 0} \frac{\sin x}{x}";
    let mut memory = ContextMemory::new();
    let plain = engine.process(&Expression::new(latex), &mut memory).unwrap();
    let mut memory = ContextMemory::new();
    let formal = engine
        .process(
            &Expression::new(latex).with_audience(AudienceLevel::Research),
            &mut memory,
        )
        .unwrap();
    assert_eq!(plain.speech.replace("approaches", "tends to"), formal.speech);
}

#[test]
fn unknown_commands_are_listed() {
    let mut memory = ContextMemory::new();
    let r = uncached()
        .process(&Expression::new(r"\frobnicate{x} + 1"), &mut memory)
        .unwrap();
    assert_eq!(r.unknown_commands, vec!["frobnicate"]);
}
