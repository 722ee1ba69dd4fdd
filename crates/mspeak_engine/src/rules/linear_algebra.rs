//! Linear algebra.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::LinearAlgebra;
        "linear_algebra.determinant.of", 900, r"\\det\s*\(\s*([^()]*?)\s*\)",
        " the determinant of $1 ", "determinant of an expression";
        "linear_algebra.determinant", 899, r"\\det\b\s?", " the determinant of ", "determinant";
        "linear_algebra.inverse", 890, r"\b([A-Z])\^\{-1\}", " the inverse of $1 ",
        "matrix inverses";
        "linear_algebra.conjugate_transpose", 888, r"\b([A-Z])\^\{(?:\\dagger\s*|\*|H)\}",
        " the conjugate transpose of $1 ", "adjoints";
        "linear_algebra.inner_product", 880, r"\\langle\s*([^,]*?)\s*,\s*(.*?)\s*\\rangle\s*",
        " the inner product of $1 and $2 ", "inner products";
        "linear_algebra.shifted", 860, r"\b([A-Z])\s*-\s*\\lambda\s*I\b",
        " $1 minus lambda times the identity ", "characteristic matrices";
        "linear_algebra.identity", 855, r"\bI_\{(n|\d+)\}", " the $1 by $1 identity matrix ",
        "sized identity matrices";
        "linear_algebra.named", 850,
        r"\\(span|rank|tr|Tr|dim|ker|diag)\b\s*(?:\(\s*([^()]*?)\s*\))?",
        Replacement::Function(speak_named), "named matrix functions";
        "linear_algebra.tensor", 845, r"\\otimes\s?", " tensor ", "tensor products";
        "linear_algebra.vector", 835, r"\\mathbf\{([a-z])\}", " vector $1 ", "bold vectors";
        "linear_algebra.real_space", 830, r"\\mathbb\{R\}\^\{([^{}]*)\}", " R $1 ",
        "coordinate spaces";
    );
    Ok(())
}

fn speak_named(c: &Captures) -> String {
    let name = match c.get(1) {
        "span" => "the span of",
        "rank" => "the rank of",
        "tr" | "Tr" => "the trace of",
        "dim" => "the dimension of",
        "ker" => "the kernel of",
        _ => "the diagonal matrix with entries",
    };
    spoken(format!("{name} {}", c.get(2)))
}
