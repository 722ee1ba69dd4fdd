//! Derivatives, partial derivatives, vector operators and series.

use mspeak_ast::DomainContext;

use super::spoken;
use crate::error::RuleError;
use crate::numbers;
use crate::pattern::{Captures, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::Calculus;
        "calculus.derivative.operator", 900, r"\\frac\{d\}\{d\s?([a-zA-Z])\}",
        " the derivative with respect to $1 of ", "d by dx applied to what follows";
        "calculus.derivative.higher_operator", 895,
        r"\\frac\{d\^\{(\d+|[a-z])\}\}\{d\s?([a-zA-Z])\^\{(?:\d+|[a-z])\}\}",
        Replacement::Function(speak_higher_operator), "higher derivative operators";
        "calculus.derivative.higher", 890,
        r"\\frac\{d\^\{(\d+|[a-z])\}\s?([a-zA-Z])\}\{d\s?([a-zA-Z])\^\{(?:\d+|[a-z])\}\}",
        Replacement::Function(speak_higher_derivative), "higher Leibniz derivatives";
        "calculus.derivative.leibniz", 885, r"\\frac\{d\s?([a-zA-Z])\}\{d\s?([a-zA-Z])\}",
        " the derivative of $1 with respect to $2 ", "Leibniz derivatives";
        "calculus.partial.operator", 880, r"\\frac\{\\partial\s?\}\{\\partial\s?([a-zA-Z])\}",
        " the partial derivative with respect to $1 of ", "partial derivative operators";
        "calculus.partial.first", 875,
        r"\\frac\{\\partial\s?([a-zA-Z])\}\{\\partial\s?([a-zA-Z])\}",
        " the partial derivative of $1 with respect to $2 ", "first partial derivatives";
        "calculus.partial.mixed", 872,
        r"\\frac\{\\partial\^\{2\}\s?([a-zA-Z])\}\{\\partial\s?([a-zA-Z])\s*\\partial\s?([a-zA-Z])\}",
        " the mixed partial derivative of $1 with respect to $2 and $3 ",
        "mixed second partial derivatives";
        "calculus.partial.higher", 870,
        r"\\frac\{\\partial\^\{(\d+)\}\s?([a-zA-Z])\}\{\\partial\s?([a-zA-Z])\^\{\d+\}\}",
        Replacement::Function(speak_higher_partial), "higher partial derivatives";
        "calculus.partial.subscript", 860, r"\\partial_\{([a-zA-Z])\}\s?",
        " the partial derivative with respect to $1 of ", "subscript partial operators";
        "calculus.divergence", 852, r"\\nabla\s*\\cdot\s*", " the divergence of ", "divergence";
        "calculus.curl", 852, r"\\nabla\s*\\times\s*", " the curl of ", "curl";
        "calculus.laplacian", 851, r"\\nabla\^\{2\}\s*", " the Laplacian of ", "Laplacian";
        "calculus.gradient", 850, r"\\nabla\s?", " the gradient of ", "gradient";
        "calculus.evaluation", 840, r"\|_\{([^{}]*)\}\^\{([^{}]*)\}",
        " evaluated from $1 to $2 ", "evaluation bars";
        "calculus.series.infinite", 830,
        r"\\sum_\{\s*([a-zA-Z])\s*=\s*([^{}]*?)\s*\}\^\{\\infty\s*\}",
        " the infinite series from $1 equals $2 of ", "infinite series";
        "calculus.limit.infinity", 820,
        r"\\lim_\{\s*([a-zA-Z])\s*\\to\s*\\infty\s*\}",
        " the limit as $1 goes to infinity of ", "limits at infinity";
        "calculus.differential", 800, r"(^|[^A-Za-z\\])d([a-zA-Z])\b", "$1d $2",
        "differentials are read letter by letter";
    );
    Ok(())
}

fn order_words(order: &str) -> String {
    numbers::ordinal_for(order).unwrap_or_else(|| format!("order {order}"))
}

fn speak_higher_operator(c: &Captures) -> String {
    spoken(format!(
        "the {} derivative with respect to {} of",
        order_words(c.get(1)),
        c.get(2)
    ))
}

fn speak_higher_derivative(c: &Captures) -> String {
    spoken(format!(
        "the {} derivative of {} with respect to {}",
        order_words(c.get(1)),
        c.get(2),
        c.get(3)
    ))
}

fn speak_higher_partial(c: &Captures) -> String {
    spoken(format!(
        "the {} partial derivative of {} with respect to {}",
        order_words(c.get(1)),
        c.get(2),
        c.get(3)
    ))
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::Calculus, text)
    }

    #[test]
    fn derivatives() {
        assert_eq!(
            say(r"\frac{d}{dx} x^{2}"),
            "the derivative with respect to x of x squared"
        );
        assert_eq!(say(r"\frac{dy}{dx}"), "the derivative of y with respect to x");
        assert_eq!(
            say(r"\frac{d^{2} y}{dx^{2}}"),
            "the second derivative of y with respect to x"
        );
    }

    #[test]
    fn partial_derivatives() {
        assert_eq!(
            say(r"\frac{\partial f}{\partial x}"),
            "the partial derivative of f with respect to x"
        );
        assert_eq!(
            say(r"\frac{\partial^{2} u}{\partial x^{2}}"),
            "the second partial derivative of u with respect to x"
        );
    }

    #[test]
    fn vector_operators() {
        assert_eq!(say(r"\nabla \cdot F"), "the divergence of F");
        assert_eq!(say(r"\nabla \times F"), "the curl of F");
        assert_eq!(say(r"\nabla f"), "the gradient of f");
        assert_eq!(say(r"\nabla^{2} u"), "the Laplacian of u");
    }

    #[test]
    fn integrals_and_evaluation() {
        assert_eq!(say(r"\iint_{D} f dA"), "the double integral over D of f, d A");
        assert_eq!(say(r"x^{2} |_{0}^{1}"), "x squared evaluated from 0 to 1");
    }

    #[test]
    fn series_and_limits() {
        assert_eq!(
            say(r"\sum_{n=1}^{\infty } a_{n}"),
            "the infinite series from n equals 1 of a sub n"
        );
        assert_eq!(
            say(r"\lim_{x \to \infty } f(x)"),
            "the limit as x goes to infinity of f of x"
        );
    }
}
