//! Counting notation.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Combinatorics;
        "combinatorics.double_factorial", 900, r"([A-Za-z0-9)])\s*!!", "$1 double factorial ",
        "double factorials";
        "combinatorics.permutations", 890,
        r"\bP\s*\(\s*([^(),]+?)\s*,\s*([^(),]+?)\s*\)",
        " the number of permutations of $1 things taken $2 at a time ", "permutation counts";
        "combinatorics.combinations", 885, r"\bC\s*\(\s*([^(),]+?)\s*,\s*([^(),]+?)\s*\)",
        " $1 choose $2 ", "combination counts";
        "combinatorics.stirling", 880, r"\bS\s*\(\s*([^(),]+?)\s*,\s*([^(),]+?)\s*\)",
        " the Stirling number of the second kind for $1 and $2 ", "Stirling numbers";
        "combinatorics.cardinality", 870, r"\|\s*([A-Z][^|]*?)\s*\|",
        " the number of elements in $1 ", "sizes of finite sets";
        "combinatorics.catalan", 860, r"\bC_\{([^{}]*)\}", " the Catalan number C sub $1 ",
        "Catalan numbers";
        "combinatorics.falling_factorial", 845, r"\(\s*([a-z])\s*\)_\{([^{}]*)\}",
        " the falling factorial $1 sub $2 ", "Pochhammer symbols";
    );
    Ok(())
}
