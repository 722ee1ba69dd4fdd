//! Asymptotic notation, recurrences and pseudocode assignment.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Algorithms;
        "algorithms.theta", 900, r"\\Theta\s*\(\s*([^()]*?)\s*\)", " big theta of $1 ",
        "tight bounds";
        "algorithms.omega", 900, r"\\Omega\s*\(\s*([^()]*?)\s*\)", " big omega of $1 ",
        "lower bounds";
        "algorithms.big_o", 895, r"\bO\s*\(\s*([^()]*?)\s*\)", " big O of $1 ", "upper bounds";
        "algorithms.little_o", 890, r"\bo\s*\(\s*([^()]*?)\s*\)", " little o of $1 ",
        "strict upper bounds";
        "algorithms.log.power", 875, r"\\log\^\{(\d+|k)\}\s*([a-z])\b",
        Replacement::Function(speak_log_power), "powers of logarithms";
        "algorithms.log", 870, r"\\log\s*([a-z])\b", " log $1 ", "logarithms";
        "algorithms.assign", 860, r"\\leftarrow\s?", " gets ", "assignment arrows";
    );
    Ok(())
}

fn speak_log_power(c: &Captures) -> String {
    let n = c.get(2);
    match c.get(1) {
        "2" => spoken(format!("log squared {n}")),
        "3" => spoken(format!("log cubed {n}")),
        k => spoken(format!("log {n} to the power {k}")),
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::Algorithms, text)
    }

    #[test]
    fn asymptotic_bounds() {
        assert_eq!(say(r"\Theta(n \log n)"), "big theta of n log n");
        assert_eq!(say(r"\log^{2} n"), "log squared n");
    }

    #[test]
    fn recurrences() {
        assert_eq!(
            say("T(n) = 2T(n/2) + O(n)"),
            "T of n equals 2T of n over 2 plus big O of n"
        );
        assert_eq!(say(r"i \leftarrow i + 1"), "i gets i plus 1");
    }
}
