use std::time::{Duration, Instant};

use mspeak_guard::{check, BombReason, GuardConfig, SecurityViolation};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inputs_over_the_length_limit_are_too_long(
        body in "[a-z0-9+=]{1,40}",
        extra in 1usize..200,
    ) {
        let config = GuardConfig { max_length: 100, ..GuardConfig::default() };
        let input: String = body.chars().cycle().take(config.max_length + extra).collect();
        prop_assert_eq!(
            check(&input, &config),
            Err(SecurityViolation::TooLong { len: input.len(), max: config.max_length })
        );
    }

    #[test]
    fn repeated_open_braces_beyond_the_limit_are_too_deep(n in 49usize..2_000) {
        let config = GuardConfig::default();
        let input = "{".repeat(n);
        prop_assert_eq!(
            check(&input, &config),
            Err(SecurityViolation::TooDeeplyNested { depth: n, max: config.max_depth })
        );
    }

    #[test]
    fn accepted_text_has_no_comments_or_control_chars(
        latex in r"[a-z0-9+\-= ^_{}]{1,60}",
        comment in "[a-z ]{0,20}",
    ) {
        let input = format!("{}%{}", latex, comment);
        if let Ok(safe) = check(&input, &GuardConfig::default()) {
            prop_assert!(!safe.text().contains('%'));
            prop_assert!(!safe.text().chars().any(char::is_control));
            prop_assert!(!safe.text().starts_with(' '));
        }
    }
}

#[test]
fn two_hundred_fractions_are_rejected_quickly() {
    let input = r"\frac{1}{2}".repeat(200);
    let started = Instant::now();
    let result = check(&input, &GuardConfig::default());
    let elapsed = started.elapsed();

    match result {
        Err(SecurityViolation::ExpansionBombSuspected {
            reason: BombReason::RiskyCommandCount { command, count },
        }) => {
            assert_eq!(command, "frac");
            assert_eq!(count, 200);
        }
        other => panic!("expected an expansion bomb, got {:?}", other),
    }
    assert!(elapsed < Duration::from_millis(50), "took {:?}", elapsed);
}

#[test]
fn deeply_nested_fractions_are_rejected() {
    let mut input = String::from("x");
    for _ in 0..8 {
        input = format!(r"\frac{{{}}}{{2}}", input);
    }
    assert!(matches!(
        check(&input, &GuardConfig::default()),
        Err(SecurityViolation::ExpansionBombSuspected {
            reason: BombReason::NestedRiskyCommands { streak: 8 }
        })
    ));
}

#[test]
fn maximum_length_input_is_checked_in_linear_time() {
    let input = r"x + y_{1}^{2} ".repeat(700);
    let config = GuardConfig::default();
    assert!(input.len() <= config.max_length);
    let started = Instant::now();
    let _ = check(&input, &config);
    assert!(started.elapsed() < Duration::from_millis(50));
}

#[test]
fn every_violation_has_a_remediation() {
    let config = GuardConfig::default();
    let inputs = [
        String::new(),
        "x".repeat(20_000),
        r"\catcode`\^=7".to_string(),
        "{".repeat(60),
        r"\sqrt{x}".repeat(60),
        "{{{{x".to_string(),
    ];
    for input in inputs {
        let err = check(&input, &config).unwrap_err();
        assert!(!err.remediation().is_empty(), "{}", err.kind());
    }
}
