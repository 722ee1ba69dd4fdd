//! Contract tests for rule-set composition and application order.

use mspeak_ast::DomainContext;
use mspeak_engine::{apply, Pattern, Priority, Replacement, RewriteLimits, RuleRepository};
use mspeak_guard::Deadline;

fn rule(id: &str, domain: DomainContext, priority: i32, pattern: &str, to: &str) -> Pattern {
    Pattern::regex(id, domain, Priority(priority), pattern, Replacement::from(to), id).unwrap()
}

#[test]
fn critical_rules_run_before_domain_rules_regardless_of_priority_gap() {
    let repo = RuleRepository::with_default_rules().unwrap();
    let ordered = repo.ordered_for(DomainContext::Calculus);
    let ids = ordered.ids();

    let last_critical = ids
        .iter()
        .rposition(|id| repo.get(id).unwrap().priority.is_critical())
        .unwrap();
    let first_calculus = ids
        .iter()
        .position(|id| repo.get(id).unwrap().domain == DomainContext::Calculus)
        .unwrap();
    let first_general = ids
        .iter()
        .position(|id| {
            let p = repo.get(id).unwrap();
            p.domain == DomainContext::General && !p.priority.is_critical()
        })
        .unwrap();
    assert!(last_critical < first_calculus);
    assert!(first_calculus < first_general);
}

#[test]
fn other_domains_are_excluded() {
    let repo = RuleRepository::with_default_rules().unwrap();
    for domain in DomainContext::ALL {
        for pattern in repo.ordered_for(domain).iter() {
            assert!(
                pattern.domain == domain
                    || pattern.domain.is_general()
                    || pattern.priority.is_critical(),
                "{} leaked into {}",
                pattern.id,
                domain
            );
        }
    }
}

#[test]
fn applied_ids_show_critical_canonicalization_first() {
    let repo = RuleRepository::with_default_rules().unwrap();
    let out = apply(
        r"\dfrac{1}{2}",
        &repo.ordered_for(DomainContext::General),
        &Deadline::unlimited(),
        &RewriteLimits::default(),
    );
    assert_eq!(out.applied.first().map(String::as_str), Some("critical.fraction_variants"));
    assert_eq!(out.text.split_whitespace().collect::<Vec<_>>().join(" "), "one half");
}

#[test]
fn ties_keep_registration_order() {
    let repo = RuleRepository::from_patterns(vec![
        rule("general.b", DomainContext::General, 100, "x", "b"),
        rule("general.a", DomainContext::General, 100, "x", "a"),
        rule("calculus.low", DomainContext::Calculus, 1, "y", "z"),
    ]);
    let ids = repo.ordered_for(DomainContext::Calculus).ids();
    assert_eq!(ids, vec!["calculus.low", "general.b", "general.a"]);

    let out = apply(
        "x",
        &repo.ordered_for(DomainContext::General),
        &Deadline::unlimited(),
        &RewriteLimits::default(),
    );
    assert_eq!(out.text, "b");
}

#[test]
fn revision_tracks_rule_content() {
    let a = RuleRepository::from_patterns(vec![rule("r", DomainContext::General, 1, "x", "y")]);
    let b = RuleRepository::from_patterns(vec![rule("r", DomainContext::General, 1, "x", "z")]);
    let a2 = RuleRepository::from_patterns(vec![rule("r", DomainContext::General, 1, "x", "y")]);
    assert_ne!(a.revision(), b.revision());
    assert_eq!(a.revision(), a2.revision());
}

#[test]
fn every_rule_has_a_description() {
    let repo = RuleRepository::with_default_rules().unwrap();
    assert!(repo.len() > 200);
    for pattern in repo.patterns() {
        assert!(!pattern.description.is_empty(), "{}", pattern.id);
        assert!(pattern.id.contains('.'), "{}", pattern.id);
    }
}
