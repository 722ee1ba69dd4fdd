//! Ordinary differential equations. Derivatives use the classroom "d y by
//! d x" reading.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Ode;
        "ode.leibniz.higher", 900,
        r"\\frac\{d\^\{(\d+)\}\s?([a-zA-Z])\}\{d\s?([a-zA-Z])\^\{\d+\}\}",
        Replacement::Function(speak_higher), "higher derivatives";
        "ode.leibniz", 895, r"\\frac\{d\s?([a-zA-Z])\}\{d\s?([a-zA-Z])\}", " d $1 by d $2 ",
        "first derivatives";
        "ode.initial_value", 880, r"\b([yxu])( prime| double prime)?\s*\(\s*0\s*\)",
        " $1$2 at 0 ", "initial values";
        "ode.initial_time", 875, r"\b([yxu])( prime| double prime)?\s*\(\s*t_\{0\}\s*\)",
        " $1$2 at t naught ", "values at the initial time";
        "ode.vector_derivative", 870, r"\\mathbf\{([a-z])\}'", " the derivative of vector $1 ",
        "derivatives of vector unknowns";
        "ode.wronskian", 860, r"\bW\s*\(\s*([^()]*?)\s*\)", " the Wronskian of $1 ",
        "Wronskians";
        "ode.inverse_laplace", 855,
        r"\\mathcal\{L\}\^\{-1\}\s*\\\{\s*([^{}]*?)\s*\\\}",
        " the inverse Laplace transform of $1 ", "inverse Laplace transforms";
        "ode.laplace", 850, r"\\mathcal\{L\}\s*\\\{\s*([^{}]*?)\s*\\\}",
        " the Laplace transform of $1 ", "Laplace transforms";
    );
    Ok(())
}

fn speak_higher(c: &Captures) -> String {
    let (order, y, x) = (c.get(1), c.get(2), c.get(3));
    match order {
        "2" => spoken(format!("d squared {y} by d {x} squared")),
        "3" => spoken(format!("d cubed {y} by d {x} cubed")),
        n => spoken(format!("d to the {n} {y} by d {x} to the {n}")),
    }
}
