//! Property tests: enhancer idempotence and pipeline determinism.

use std::sync::{Arc, LazyLock};

use mspeak_ast::{AudienceLevel, Expression};
use mspeak_engine::{enhance, EngineConfig, RuleRepository, SpeechEngine};
use mspeak_session::ContextMemory;
use proptest::prelude::*;

// Compiling the rule tables dominates engine construction, so every case
// shares these two engines. Each case still starts from fresh memories.
static RULES: LazyLock<Arc<RuleRepository>> = LazyLock::new(|| {
    Arc::new(RuleRepository::with_default_rules().expect("default rules compile"))
});

static CACHED: LazyLock<SpeechEngine> =
    LazyLock::new(|| SpeechEngine::with_repository(EngineConfig::default(), RULES.clone()));

static UNCACHED: LazyLock<SpeechEngine> = LazyLock::new(|| {
    let mut config = EngineConfig::default();
    config.cache.enabled = false;
    SpeechEngine::with_repository(config, RULES.clone())
});

const WORDS: &[&str] = &[
    "the", "the", "quantity", "x", "plus", "1", "squared", "d", "approaches", "for", "every",
    "is", "approximately", "equal", "to", "sin", ",", ".", "!", "integral", "of", "so",
];

fn speech_like() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..24).prop_map(|w| w.join(" "))
}

fn audience() -> impl Strategy<Value = AudienceLevel> {
    prop::sample::select(AudienceLevel::ALL.to_vec())
}

const FRAGMENTS: &[&str] = &[
    r"\frac{1}{2}",
    "x^2",
    r"\int_0^1",
    " dx",
    " + ",
    r"\sqrt{y}",
    r"\sum_{k=1}^{n} k",
    r"\alpha",
    " = ",
    r"\lim_{x \to 0}",
    r"\sin x",
    r"\{a, b\}",
    r"\in A",
];

fn latex_like() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 1..8).prop_map(|f| f.concat())
}

proptest! {
    #[test]
    fn enhance_is_idempotent(text in speech_like(), level in audience()) {
        let once = enhance(&text, level);
        prop_assert_eq!(enhance(&once, level), once);
    }

    #[test]
    fn enhance_never_leaves_double_spaces(text in speech_like(), level in audience()) {
        let out = enhance(&text, level);
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn processing_is_deterministic_without_cache(latex in latex_like(), level in audience()) {
        let engine = &*UNCACHED;
        let expression = Expression::new(latex).with_audience(level);

        let mut m1 = ContextMemory::new();
        let mut m2 = ContextMemory::new();
        let a = engine.process(&expression, &mut m1);
        let b = engine.process(&expression, &mut m2);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.speech, b.speech);
                prop_assert_eq!(a.domain, b.domain);
                prop_assert_eq!(a.applied_rules, b.applied_rules);
                prop_assert_eq!(a.warnings, b.warnings);
                prop_assert_eq!(m1, m2);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.kind(), b.kind()),
            (a, b) => prop_assert!(false, "diverged: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }

    #[test]
    fn cached_and_uncached_speech_agree(latex in latex_like()) {
        let (cached, uncached) = (&*CACHED, &*UNCACHED);
        let expression = Expression::new(latex);

        let mut warm = ContextMemory::new();
        let first = cached.process(&expression, &mut warm);
        let mut m1 = ContextMemory::new();
        let mut m2 = ContextMemory::new();
        if let (Ok(_), Ok(hit), Ok(fresh)) = (
            first,
            cached.process(&expression, &mut m1),
            uncached.process(&expression, &mut m2),
        ) {
            prop_assert!(hit.cache_hit);
            prop_assert_eq!(hit.speech, fresh.speech);
            prop_assert_eq!(m1, m2);
        }
    }
}
