//! Probability and statistics.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Statistics;
        "statistics.expectation", 900,
        r"(?:\\mathbb\{E\}|\\operatorname\{E\}|\bE)\s*\[\s*([^\[\]]*?)\s*\]",
        " the expected value of $1 ", "expectations";
        "statistics.variance", 890, r"\\Var\s*[(\[]\s*([^()\[\]]*?)\s*[)\]]",
        " the variance of $1 ", "variances";
        "statistics.covariance", 890, r"\\Cov\s*\(\s*([^(),]*?)\s*,\s*([^()]*?)\s*\)",
        " the covariance of $1 and $2 ", "covariances";
        "statistics.conditional", 880,
        r"(?:\bP|\\Pr)\s*\(\s*([^()|]*?)\s*(?:\||\\mid)\s*([^()]*?)\s*\)",
        " the probability of $1 given $2 ", "conditional probabilities";
        "statistics.probability", 875, r"(?:\bP|\\Pr)\s*\(\s*([^()]*?)\s*\)",
        " the probability of $1 ", "probabilities";
        "statistics.standard_normal", 872, r"\bN\s*\(\s*0\s*,\s*1\s*\)",
        " the standard normal distribution ", "the standard normal";
        "statistics.normal", 870,
        r"(?:\\mathcal\{N\}|\bN)\s*\(\s*([^(),]*?)\s*,\s*([^()]*?)\s*\)",
        " a normal distribution with mean $1 and variance $2 ", "normal distributions";
        "statistics.distributed", 865, r"\\sim\b\s?", " is distributed as ", "distributed as";
        "statistics.null_hypothesis", 860, r"\bH_\{0\}", " the null hypothesis ",
        "null hypotheses";
        "statistics.alternative_hypothesis", 860, r"\bH_\{(?:1|a|A)\}",
        " the alternative hypothesis ", "alternative hypotheses";
        "statistics.sample_mean", 855, r"\\(?:bar|overline)\{([A-Za-z])\}",
        " the sample mean of $1 ", "sample means";
        "statistics.estimator", 850, r"\\hat\{\\?([A-Za-z]+)\s*\}", " the estimate of $1 ",
        "estimators";
        "statistics.iid", 840, r"\bi\.i\.d\.|\biid\b",
        " independent and identically distributed ", "independence assumptions";
    );
    Ok(())
}
