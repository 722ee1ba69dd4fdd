//! Built-in rule tables, one module per domain.
//!
//! Every module exposes `register`, called once while the repository is
//! built. Registration order breaks priority ties, so keep tables in the
//! order they should win.

use crate::error::RuleError;
use crate::repository::RuleSetBuilder;

pub mod algorithms;
pub mod calculus;
pub mod combinatorics;
pub mod complex;
pub mod critical;
pub mod general;
pub mod linear_algebra;
pub mod logic;
pub mod manifolds;
pub mod measure;
pub mod number_theory;
pub mod numerical;
pub mod ode;
pub mod real_analysis;
pub mod set_theory;
pub mod statistics;
pub mod topology;

pub fn register_all(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    critical::register(rules)?;
    calculus::register(rules)?;
    complex::register(rules)?;
    topology::register(rules)?;
    real_analysis::register(rules)?;
    measure::register(rules)?;
    numerical::register(rules)?;
    combinatorics::register(rules)?;
    algorithms::register(rules)?;
    manifolds::register(rules)?;
    ode::register(rules)?;
    set_theory::register(rules)?;
    logic::register(rules)?;
    linear_algebra::register(rules)?;
    statistics::register(rules)?;
    number_theory::register(rules)?;
    general::register(rules)?;
    Ok(())
}

/// Pads a spoken phrase so it never fuses with its neighbours; the enhancer
/// collapses the extra spaces.
pub(crate) fn spoken(phrase: impl AsRef<str>) -> String {
    format!(" {} ", phrase.as_ref().trim())
}

/// A short operand that reads naturally without "the fraction"/"the
/// quantity" framing: `x`, `2n`, `dy`, `10`.
pub(crate) fn is_simple_operand(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.len() <= 4
        && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
}

#[cfg(test)]
pub(crate) mod test_support {
    use mspeak_ast::DomainContext;
    use mspeak_guard::Deadline;

    use crate::applier::{apply, RuleOutcome};
    use crate::config::RewriteLimits;
    use crate::repository::RuleRepository;
    use std::sync::LazyLock;

    static REPO: LazyLock<RuleRepository> = LazyLock::new(|| {
        RuleRepository::with_default_rules().expect("default rules compile")
    });

    /// Rewrite already-linearized text with `domain`'s rule set and collapse
    /// whitespace.
    pub fn rewrite(domain: DomainContext, text: &str) -> String {
        outcome(domain, text)
            .text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(" ,", ",")
    }

    pub fn outcome(domain: DomainContext, text: &str) -> RuleOutcome {
        apply(
            text,
            &REPO.ordered_for(domain),
            &Deadline::unlimited(),
            &RewriteLimits::default(),
        )
    }
}
