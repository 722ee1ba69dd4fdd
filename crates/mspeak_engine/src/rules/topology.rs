//! Point-set and algebraic topology.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::numbers;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Topology;
        "topology.closure", 900, r"\\overline\{\s*([A-Z])\s*\}", " the closure of $1 ", "closure";
        "topology.interior", 890, r"\b([A-Z])\^\{\\circ\s*\}", " the interior of $1 ",
        "interior as a superscript circle";
        "topology.interior.named", 889,
        r"\\operatorname\{int\}\s*\(?\s*([A-Z])\s*\)?", " the interior of $1 ",
        "interior as an operator";
        "topology.boundary", 880, r"\\partial\s*([A-Z])\b", " the boundary of $1 ", "boundary";
        "topology.fundamental_group", 870, r"\\pi_\{1\}\s*\(\s*([^()]*?)\s*\)",
        " the fundamental group of $1 ", "fundamental group";
        "topology.homotopy_group", 865, r"\\pi_\{(\d+|n|k)\}\s*\(\s*([^()]*?)\s*\)",
        Replacement::Function(speak_homotopy_group), "higher homotopy groups";
        "topology.homeomorphic", 860, r"\\cong\s?", " is homeomorphic to ", "homeomorphism";
        "topology.homotopy_equivalent", 860, r"\\simeq\s?", " is homotopy equivalent to ",
        "homotopy equivalence";
        "topology.homotopic", 855, r"\\sim\b\s?", " is homotopic to ", "homotopic maps";
        "topology.space", 850, r"\(\s*([A-Z])\s*,\s*\\tau\s*\)", " the space $1 with topology tau ",
        "topological spaces as pairs";
        "topology.preimage", 845, r"\b([fgh])\^\{-1\}\s*\(\s*([^()]*?)\s*\)",
        " the preimage of $2 under $1 ", "preimages of sets";
        "topology.open_ball", 840, r"\bB_\{([^{}]*)\}\s*\(\s*([^()]*?)\s*\)",
        " the open ball of radius $1 around $2 ", "open balls";
    );
    Ok(())
}

fn speak_homotopy_group(c: &Captures) -> String {
    let order = numbers::ordinal_for(c.get(1)).unwrap_or_else(|| c.get(1).to_string());
    spoken(format!("the {order} homotopy group of {}", c.get(2)))
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::Topology, text)
    }

    #[test]
    fn closure_interior_boundary() {
        assert_eq!(say(r"\overline{A} = A"), "the closure of A equals A");
        assert_eq!(say(r"A^{\circ }"), "the interior of A");
        assert_eq!(say(r"\partial A"), "the boundary of A");
    }

    #[test]
    fn maps_and_groups() {
        assert_eq!(say(r"f^{-1}(U)"), "the preimage of U under f");
        assert_eq!(say(r"X \cong Y"), "X is homeomorphic to Y");
        assert_eq!(say(r"\pi_{1}(X)"), "the fundamental group of X");
        assert_eq!(say(r"\pi_{2}(S)"), "the second homotopy group of S");
    }
}
