//! Speech cached by one engine survives a snapshot and serves another.

use mspeak_ast::Expression;
use mspeak_engine::{EngineConfig, SpeechEngine};
use mspeak_session::ContextMemory;

#[test]
fn snapshot_warms_a_new_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speech.cache");

    let first = SpeechEngine::new(EngineConfig::default()).unwrap();
    let mut memory = ContextMemory::new();
    let original = first
        .process(&Expression::new(r"\int_0^1 x^2 dx"), &mut memory)
        .unwrap();
    assert_eq!(first.save_cache(&path).unwrap(), 1);

    let second = SpeechEngine::new(EngineConfig::default()).unwrap();
    assert_eq!(second.load_cache(&path).unwrap(), 1);
    let mut memory = ContextMemory::new();
    let replayed = second
        .process(&Expression::new(r"\int_0^1 x^2 dx"), &mut memory)
        .unwrap();
    assert!(replayed.cache_hit);
    assert_eq!(replayed.speech, original.speech);
    assert_eq!(replayed.applied_rules, original.applied_rules);
    assert_eq!(memory.current_topic(), original_topic(&original));
}

fn original_topic(result: &mspeak_engine::EngineResult) -> Option<mspeak_ast::DomainContext> {
    (!result.domain.is_general()).then_some(result.domain)
}

#[test]
fn disabled_cache_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::default();
    config.cache.enabled = false;
    let engine = SpeechEngine::new(config).unwrap();
    assert_eq!(engine.save_cache(&dir.path().join("none")).unwrap(), 0);
    assert!(engine.cache_stats().is_none());
}
