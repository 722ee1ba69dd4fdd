//! Real analysis: sequences, convergence and epsilon-delta arguments.
//!
//! Arrows read as convergence here, so the limit subscripts that also use
//! `\to` are rewritten first.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::RealAnalysis;
        "real_analysis.limit.infinity", 900,
        r"\\lim_\{\s*([a-zA-Z])\s*\\to\s*\\infty\s*\}",
        " the limit as $1 goes to infinity of ", "limits of sequences";
        "real_analysis.limit.approach", 895,
        r"\\lim_\{\s*([^{}]*?)\s*\\(?:to|rightarrow)\s*([^{}]*?)\s*\}",
        " the limit as $1 approaches $2 of ", "limits at a point";
        "real_analysis.limsup", 890,
        r"\\limsup_\{\s*([^{}]*?)\s*\\to\s*([^{}]*?)\s*\}",
        " the limit superior as $1 goes to $2 of ", "limit superior";
        "real_analysis.liminf", 890,
        r"\\liminf_\{\s*([^{}]*?)\s*\\to\s*([^{}]*?)\s*\}",
        " the limit inferior as $1 goes to $2 of ", "limit inferior";
        "real_analysis.epsilon_delta", 880,
        r"\\forall\s*\\(?:var)?epsilon\s*>\s*0\s*,?\s*\\exists\s*\\delta\s*>\s*0",
        " for every epsilon greater than 0, there exists delta greater than 0 ",
        "the epsilon-delta preamble";
        "real_analysis.sequence", 870,
        r"\(\s*([a-z])_\{([a-z])\}\s*\)(?:_\{(?:[^{}]|\{[^{}]*\})*\})?",
        " the sequence $1 sub $2 ", "sequences in parentheses";
        "real_analysis.sequence.braces", 868,
        r"\\\{\s*([a-z])_\{([a-z])\}\s*\\\}(?:_\{(?:[^{}]|\{[^{}]*\})*\})?",
        " the sequence $1 sub $2 ", "sequences in braces";
        "real_analysis.converges", 860, r"\\(?:to|rightarrow)\b\s?", " converges to ",
        "arrows between terms are convergence";
        "real_analysis.converges_uniformly", 855, r"\\rightrightarrows\s?",
        " converges uniformly to ", "uniform convergence";
        "real_analysis.real_line", 850, r"\\mathbb\{R\}", " the real line ", "the real line";
        "real_analysis.sup_norm", 845, r"\\\|\s*([^|]*?)\s*\\\|_\{\\infty\s*\}",
        " the supremum norm of $1 ", "supremum norm";
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::RealAnalysis, text)
    }

    #[test]
    fn limits_of_sequences() {
        assert_eq!(
            say(r"\lim_{n \to \infty } a_{n} = L"),
            "the limit as n goes to infinity of a sub n equals L"
        );
        assert_eq!(say(r"a_{n} \to L"), "a sub n converges to L");
    }

    #[test]
    fn epsilon_delta() {
        assert_eq!(
            say(r"\forall \epsilon > 0 \exists \delta > 0"),
            "for every epsilon greater than 0, there exists delta greater than 0"
        );
    }

    #[test]
    fn sequences_and_norms() {
        assert_eq!(say(r"(a_{n})_{n \in \mathbb{N}}"), "the sequence a sub n");
        assert_eq!(say(r"\|f\|_{\infty }"), "the supremum norm of f");
    }
}
