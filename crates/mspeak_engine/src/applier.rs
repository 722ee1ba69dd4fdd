//! The rewrite loop: apply an ordered rule set until the text stops changing.

use mspeak_guard::Deadline;
use rustc_hash::FxHashSet;

use crate::config::RewriteLimits;
use crate::repository::OrderedRuleSet;

/// What one run of the rewrite loop produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub text: String,
    /// Ids of rules that changed the text, in order of first application.
    pub applied: Vec<String>,
    pub passes: usize,
    /// The deadline expired before the loop finished.
    pub timed_out: bool,
    /// The loop stopped on `max_passes` or the output budget instead of
    /// converging.
    pub limit_hit: bool,
}

impl RuleOutcome {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            applied: Vec::new(),
            passes: 0,
            timed_out: false,
            limit_hit: false,
        }
    }
}

/// Apply `rules` in order, pass after pass, until a full pass leaves the text
/// unchanged.
///
/// Each rule sees the output of the rule before it. The deadline is checked
/// before every rule; once it expires the partial text is returned with
/// `timed_out` set and callers must not use it.
pub fn apply(
    text: &str,
    rules: &OrderedRuleSet<'_>,
    deadline: &Deadline,
    limits: &RewriteLimits,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::new(text);
    let budget = limits.output_budget(text.len());
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    'passes: while outcome.passes < limits.max_passes {
        outcome.passes += 1;
        let mut changed = false;

        for rule in rules.iter() {
            if deadline.is_expired() {
                tracing::warn!(
                    pass = outcome.passes,
                    rule = %rule.id,
                    elapsed_ms = deadline.elapsed().as_millis() as u64,
                    "rewrite deadline expired"
                );
                outcome.timed_out = true;
                return outcome;
            }
            let Some(next) = rule.rewrite(&outcome.text) else {
                continue;
            };
            tracing::trace!(rule = %rule.id, pass = outcome.passes, "rule applied");
            outcome.text = next;
            changed = true;
            if seen.insert(rule.id.as_str()) {
                outcome.applied.push(rule.id.clone());
            }
            if outcome.text.len() > budget {
                tracing::warn!(
                    rule = %rule.id,
                    len = outcome.text.len(),
                    budget,
                    "rewrite output exceeded its budget"
                );
                outcome.limit_hit = true;
                break 'passes;
            }
        }

        if !changed {
            return outcome;
        }
    }

    if !outcome.limit_hit {
        tracing::warn!(
            passes = outcome.passes,
            domain = rules.domain.as_str(),
            "rewrite did not converge"
        );
        outcome.limit_hit = true;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Pattern, Priority, Replacement};
    use crate::repository::RuleRepository;
    use mspeak_ast::DomainContext;
    use std::time::Duration;

    fn rule(id: &str, priority: i32, pattern: &str, replacement: &str) -> Pattern {
        Pattern::regex(
            id,
            DomainContext::General,
            Priority(priority),
            pattern,
            Replacement::from(replacement),
            id,
        )
        .unwrap()
    }

    fn run(repo: &RuleRepository, text: &str) -> RuleOutcome {
        apply(
            text,
            &repo.ordered_for(DomainContext::General),
            &Deadline::unlimited(),
            &RewriteLimits::default(),
        )
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let repo = RuleRepository::from_patterns(vec![
            rule("first", 20, "a", "b"),
            rule("second", 10, "b", "c"),
        ]);
        let out = run(&repo, "a");
        assert_eq!(out.text, "c");
        assert_eq!(out.applied, vec!["first", "second"]);
        assert_eq!(out.passes, 2);
        assert!(!out.limit_hit && !out.timed_out);
    }

    #[test]
    fn applied_ids_are_not_repeated() {
        let repo = RuleRepository::from_patterns(vec![
            rule("drop", 20, "xx", "x"),
        ]);
        let out = run(&repo, "xxxxxxxx");
        assert_eq!(out.text, "x");
        assert_eq!(out.applied, vec!["drop"]);
    }

    #[test]
    fn oscillating_rules_stop_at_the_pass_limit() {
        let repo = RuleRepository::from_patterns(vec![
            rule("ab", 20, "^a$", "b"),
            rule("ba", 10, "^b$", "a"),
        ]);
        let out = run(&repo, "a");
        assert!(out.limit_hit);
        assert_eq!(out.passes, RewriteLimits::default().max_passes);
    }

    #[test]
    fn runaway_growth_hits_the_output_budget() {
        let repo = RuleRepository::from_patterns(vec![rule("grow", 10, "x", "xx")]);
        let limits = RewriteLimits {
            max_passes: 100,
            max_growth_factor: 2,
        };
        let out = apply(
            "x",
            &repo.ordered_for(DomainContext::General),
            &Deadline::unlimited(),
            &limits,
        );
        assert!(out.limit_hit);
        assert!(out.passes < 100);
    }

    #[test]
    fn expired_deadline_stops_before_any_rule() {
        let repo = RuleRepository::from_patterns(vec![rule("r", 10, "a", "b")]);
        let deadline = Deadline::start(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        let out = apply(
            "a",
            &repo.ordered_for(DomainContext::General),
            &deadline,
            &RewriteLimits::default(),
        );
        assert!(out.timed_out);
        assert_eq!(out.text, "a");
        assert!(out.applied.is_empty());
    }
}
