//! Numerical analysis: iterations, step methods and error terms.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::numbers;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::NumericalAnalysis;
        "numerical.newton", 900,
        r"x_\{n\s*\+\s*1\}\s*=\s*x_\{n\}\s*-\s*\\frac\{f\s*\(x_\{n\}\)\}\{f prime\s*\(x_\{n\}\)\}",
        " the Newton update: x sub n plus 1 equals x sub n minus f of x sub n over f prime of x sub n ",
        "Newton iteration";
        "numerical.euler", 895,
        r"y_\{n\s*\+\s*1\}\s*=\s*y_\{n\}\s*\+\s*h\s*f\s*\(\s*t_\{n\}\s*,\s*y_\{n\}\s*\)",
        " the Euler step: y sub n plus 1 equals y sub n plus h times f of t sub n and y sub n ",
        "explicit Euler step";
        "numerical.order.power", 880, r"\bO\s*\(\s*h\^\{([^{}]*)\}\s*\)",
        Replacement::Function(speak_order), "order of a method";
        "numerical.order.linear", 879, r"\bO\s*\(\s*h\s*\)", " of order h ",
        "first order";
        "numerical.absolute_error", 860, r"\|\s*e_\{([^{}]*)\}\s*\|",
        " the absolute error at step $1 ", "error magnitudes";
        "numerical.machine_epsilon", 850, r"\\(?:var)?epsilon_\{\s*mach(?:ine)?\s*\}",
        " machine epsilon ", "unit roundoff";
        "numerical.condition_number", 845, r"\\kappa\s*\(\s*([^()]*?)\s*\)",
        " the condition number of $1 ", "condition numbers";
        "numerical.step_to_zero", 840, r"\bh\s*\\to\s*0\b", " h approaches 0 ",
        "vanishing step size";
        "numerical.forward_difference", 835, r"\\Delta\s?([a-z])_\{([^{}]*)\}",
        " the forward difference of $1 sub $2 ", "forward differences";
        "numerical.approximately", 830, r"\\approx\s?", " is approximately ", "approximation";
    );
    Ok(())
}

fn speak_order(c: &Captures) -> String {
    match numbers::ordinal_for(c.get(1)) {
        Some(ordinal) => spoken(format!("of order h to the {ordinal}")),
        None => spoken(format!("of order h to the power {}", c.get(1))),
    }
}
