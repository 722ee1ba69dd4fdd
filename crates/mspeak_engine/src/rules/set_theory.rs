//! Set theory. Membership is read as "is an element of" and bars as
//! cardinality.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::SetTheory;
        "set_theory.builder", 900,
        r"\\\{\s*([a-z])\s*\\in\s*((?:[^{}|:]|\{[^{}]*\})*?)\s*(?:\\mid|\||:)\s*([^{}]*?)\s*\\\}",
        " the set of $1 in $2 such that $3 ", "set builder with a domain";
        "set_theory.complement", 890, r"\b([A-Z])\^\{(?:c|C|\\complement\s*)\}",
        " the complement of $1 ", "complements";
        "set_theory.power_set", 880, r"(?:\\mathcal\{P\}|\\wp\s?)\s*\(\s*([^()]*?)\s*\)",
        " the power set of $1 ", "power sets";
        "set_theory.cardinality", 870, r"\|\s*([^|]+?)\s*\|", " the cardinality of $1 ",
        "cardinality";
        "set_theory.aleph_null", 862, r"\\aleph_\{0\}", " aleph null ", "countable cardinality";
        "set_theory.aleph", 860, r"\\aleph_\{([^{}]*)\}", " aleph $1 ", "alephs";
        "set_theory.product", 850, r"\b([A-Z])\s*\\times\s*([A-Z])\b",
        " the Cartesian product of $1 and $2 ", "Cartesian products";
        "set_theory.subset_eq", 845, r"\\subseteq\s?", " is a subset of ", "subsets";
        "set_theory.subset", 845, r"\\subset\b\s?", " is a proper subset of ", "proper subsets";
        "set_theory.difference", 840, r"\\setminus\s?", " minus ", "set difference";
        "set_theory.element", 830, r"\\in\b\s?", " is an element of ", "membership";
        "set_theory.not_element", 830, r"\\notin\b\s?", " is not an element of ",
        "non-membership";
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::SetTheory, text)
    }

    #[test]
    fn set_operations() {
        assert_eq!(say(r"A^{c}"), "the complement of A");
        assert_eq!(say(r"\mathcal{P}(A)"), "the power set of A");
        assert_eq!(say(r"x \in A \setminus B"), "x is an element of A minus B");
        assert_eq!(say(r"A \times B"), "the Cartesian product of A and B");
    }

    #[test]
    fn builders_and_cardinality() {
        assert_eq!(
            say(r"\{x \in \mathbb{R} \mid x > 0\}"),
            "the set of x in the real numbers such that x is greater than 0"
        );
        assert_eq!(
            say(r"|\mathcal{P}(A)| = 2^{n}"),
            "the cardinality of the power set of A equals 2 to the nth power"
        );
        assert_eq!(say(r"\aleph_{0}"), "aleph null");
    }
}
