//! Propositional and predicate logic.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Logic;
        "logic.forall", 900, r"\\forall\s?", " for all ", "universal quantifier";
        "logic.exists_unique", 895, r"\\exists\s*!\s*", " there exists a unique ",
        "unique existence";
        "logic.exists", 890, r"\\exists\b\s?", " there exists ", "existential quantifier";
        "logic.nexists", 890, r"\\nexists\s?", " there does not exist ", "negated existence";
        "logic.and", 880, r"\\(?:land|wedge)\b\s?", " and ", "conjunction";
        "logic.or", 880, r"\\(?:lor|vee)\b\s?", " or ", "disjunction";
        "logic.not", 880, r"\\neg\b\s?", " not ", "negation";
        "logic.implies", 870, r"\\(?:Rightarrow|rightarrow|to)\b\s?", " implies ",
        "implication";
        "logic.iff", 870, r"\\(?:Leftrightarrow|leftrightarrow)\b\s?", " if and only if ",
        "biconditional";
        "logic.proves", 860, r"\\vdash\s?", " proves ", "syntactic entailment";
        "logic.models", 860, r"\\models\s?", " semantically entails ", "semantic entailment";
        "logic.true", 850, r"\\top\b\s?", " true ", "verum";
        "logic.false", 850, r"\\bot\b\s?", " false ", "falsum";
        "logic.therefore", 845, r"\\therefore\s?", " therefore ", "conclusion marker";
        "logic.equivalent", 840, r"\\equiv\s?", " is logically equivalent to ",
        "logical equivalence";
        "logic.predicate", 830, r"\b([A-Z])\s*\(\s*([^()]*?)\s*\)", " $1 of $2 ",
        "predicates applied to terms";
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::Logic, text)
    }

    #[test]
    fn quantifiers_and_predicates() {
        assert_eq!(
            say(r"\forall x \exists y, P(x) \Rightarrow Q(y)"),
            "for all x there exists y, P of x implies Q of y"
        );
    }

    #[test]
    fn connectives() {
        assert_eq!(
            say(r"\neg (p \land q) \equiv \neg p \lor \neg q"),
            "not the quantity p and q is logically equivalent to not p or not q"
        );
        assert_eq!(say(r"\Gamma \vdash \phi "), "capital gamma proves phi");
    }
}
