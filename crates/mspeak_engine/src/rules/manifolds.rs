//! Differential geometry on manifolds.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Manifolds;
        "manifolds.cotangent_space", 900, r"\bT_\{([^{}]*)\}\^\{\*\}\s*([A-Z])\b",
        " the cotangent space of $2 at $1 ", "cotangent spaces";
        "manifolds.tangent_space", 895, r"\bT_\{([^{}]*)\}\s*([A-Z])\b",
        " the tangent space of $2 at $1 ", "tangent spaces";
        "manifolds.tangent_bundle", 890, r"\bT([A-Z])\b", " the tangent bundle of $1 ",
        "tangent bundles";
        "manifolds.covariant_derivative", 880, r"\\nabla_\{([^{}]*)\}\s*",
        " the covariant derivative along $1 of ", "connections";
        "manifolds.exterior_derivative", 870,
        r"(^|[^A-Za-z\\])d\s*\\(omega|alpha|eta|theta)\b\s?",
        "$1 the exterior derivative of $2 ", "exterior derivatives of forms";
        "manifolds.wedge", 865, r"\\wedge\s?", " wedge ", "wedge products";
        "manifolds.christoffel", 860, r"\\Gamma_\{([^{}]*)\}\^\{([^{}]*)\}",
        " the Christoffel symbol with upper index $2 and lower indices $1 ",
        "Christoffel symbols";
        "manifolds.pullback", 855, r"\\?([a-zA-Z]+)\^\{\*\}\s*", " the pullback by $1 of ",
        "pullbacks";
        "manifolds.lie_bracket", 850, r"\[\s*([A-Z])\s*,\s*([A-Z])\s*\]",
        " the Lie bracket of $1 and $2 ", "Lie brackets of vector fields";
        "manifolds.metric", 845, r"\bg_\{([a-z]{2})\}", " the metric component g sub $1 ",
        "metric tensor components";
    );
    Ok(())
}
