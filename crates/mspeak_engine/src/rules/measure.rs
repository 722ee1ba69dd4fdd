//! Measure theory.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::MeasureTheory;
        "measure.integral.over", 900,
        r"\\int_\{([^{}]*)\}\s*(.*?)\s*\bd\s?\\(mu|nu|lambda)\b\s?",
        " the integral over $1 of $2 with respect to $3 ", "integrals against a measure";
        "measure.integral.bare", 895, r"\\int\s+(.*?)\s*\bd\s?\\(mu|nu|lambda)\b\s?",
        " the integral of $1 with respect to $2 ", "integrals against a measure, no domain";
        "measure.measure_of", 880, r"\\(mu|nu|lambda)\s*\(\s*([^()]*?)\s*\)",
        Replacement::Function(speak_measure_of), "measures of sets";
        "measure.sigma_algebra", 870, r"\\sigma\s*\(\s*([^()]*?)\s*\)",
        " the sigma algebra generated by $1 ", "generated sigma algebras";
        "measure.almost_everywhere", 860, r"\ba\.e\.|\balmost everywhere\b",
        " almost everywhere ", "almost everywhere";
        "measure.lp_space", 850, r"\bL\^\{([^{}]*)\}", " L $1 space ", "L p spaces";
        "measure.borel.of", 846, r"\\mathcal\{B\}\s*\(\s*([^()]*?)\s*\)",
        " the Borel sigma algebra of $1 ", "Borel sets of a space";
        "measure.borel", 845, r"\\mathcal\{B\}", " the Borel sigma algebra ", "Borel sets";
        "measure.filtration", 841, r"\\mathcal\{F\}_\{([^{}]*)\}", " the sigma algebra F sub $1 ",
        "filtrations";
        "measure.sigma_field", 840, r"\\mathcal\{F\}", " the sigma algebra F ", "sigma fields";
        "measure.indicator", 835, r"(?:\\mathbf\{1\}|\\mathbb\{1\}|\\chi)_\{([^{}]*)\}",
        " the indicator function of $1 ", "indicator functions";
        "measure.increasing", 830, r"\\uparrow\s?", " increases to ", "monotone limits";
    );
    Ok(())
}

fn speak_measure_of(c: &Captures) -> String {
    let set = c.get(2);
    match c.get(1) {
        "lambda" => spoken(format!("the Lebesgue measure of {set}")),
        "mu" => spoken(format!("the measure of {set}")),
        other => spoken(format!("the measure {other} of {set}")),
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::MeasureTheory, text)
    }

    #[test]
    fn integrals_against_measures() {
        assert_eq!(
            say(r"\int_{X} f d\mu "),
            "the integral over X of f with respect to mu"
        );
    }

    #[test]
    fn measures_of_sets() {
        assert_eq!(say(r"\lambda(A) = 0"), "the Lebesgue measure of A equals 0");
        assert_eq!(say(r"\mu(E)"), "the measure of E");
        assert_eq!(say(r"f = g \text{ a.e.}"), "f equals g almost everywhere");
        assert_eq!(say(r"\mathbf{1}_{A}"), "the indicator function of A");
    }
}
