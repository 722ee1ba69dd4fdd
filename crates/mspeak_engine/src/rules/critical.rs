//! Canonicalization rules. They run first in every domain so later tables
//! only have to recognise one spelling of each construct.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::pattern::{Pattern, Priority};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::General;
        "critical.text", 1400,
        r"\\(?:text|textrm|textit|textbf|textsf|texttt|mbox|emph)\{([^{}]*)\}", " $1 ",
        "read prose arguments verbatim";
        "critical.fraction_variants", 1300, r"\\[dtc]frac\b", r"\frac",
        "display and text fractions read like plain fractions";
        "critical.binomial_variants", 1300, r"\\[dt]binom\b", r"\binom",
        "display and text binomials read like plain binomials";
        "critical.roman_d", 1250, r"\\mathrm\{d\}\s*", "d",
        "upright differential d";
        "critical.le", 1200, r"\\le(?:qslant)?\b", r"\leq",
        "one spelling for less than or equal";
        "critical.ge", 1200, r"\\ge(?:qslant)?\b", r"\geq",
        "one spelling for greater than or equal";
        "critical.ne", 1200, r"\\ne\b", r"\neq",
        "one spelling for not equal";
        "critical.implies", 1200, r"\\(?:implies|Longrightarrow)\b", r"\Rightarrow",
        "one spelling for implication";
        "critical.iff", 1200, r"\\(?:iff|Longleftrightarrow)\b", r"\Leftrightarrow",
        "one spelling for equivalence";
        "critical.lnot", 1200, r"\\lnot\b", r"\neg",
        "one spelling for negation";
        "critical.dots", 1200, r"\\(?:cdots|dotsc|dotsb|dots)\b", r"\ldots",
        "one spelling for an ellipsis";
        "critical.vert", 1200, r"\\(?:lvert|rvert|vert)\b\s*", "|",
        "absolute value bars";
        "critical.norm_bars", 1200, r"\\(?:lVert|rVert|Vert)\b\s*", r"\|",
        "norm bars";
        "critical.coloneqq", 1150, r"\\coloneqq\b\s*|:=", " is defined as ",
        "definition by assignment";
        "critical.operatorname", 1100,
        r"\\operatorname\{(Res|Re|Im|Var|Cov|Pr|rank|tr|Tr|sgn|span|diag|lcm|supp|dist|Hom|id)\}",
        r"\$1",
        "named operators become plain commands";
        "critical.double_prime", 1090, r"([A-Za-z])''", "$1 double prime",
        "second derivative marks";
        "critical.prime", 1080, r"([A-Za-z])'", "$1 prime",
        "derivative marks";
        "critical.negative", 1050, r"(^|[=(,\[<>]\s*)-\s*", "$1negative ",
        "a leading minus sign is a negative, not a subtraction";
    );

    rules.add(Pattern::command(
        "critical.boxed",
        DomainContext::General,
        Priority(1000),
        "boxed",
        1,
        " $1 ".into(),
        "boxed results read their content",
    ))?;
    rules.add(Pattern::command(
        "critical.color",
        DomainContext::General,
        Priority(1000),
        "color",
        1,
        "".into(),
        "colors are not read",
    ))?;
    Ok(())
}
