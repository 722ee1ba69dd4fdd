//! Elementary number theory.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::NumberTheory;
        "number_theory.congruence", 900, r"\\equiv\s*([^\\]*?)\s*\\pmod\{([^{}]*)\}",
        " is congruent to $1 modulo $2 ", "congruences with pmod";
        "number_theory.congruence.paren", 895,
        r"\\equiv\s*([^\\(]*?)\s*\(\s*\\(?:mod|bmod)\b\s*([^()]*?)\s*\)",
        " is congruent to $1 modulo $2 ", "congruences with a parenthesized modulus";
        "number_theory.equiv", 890, r"\\equiv\s?", " is congruent to ", "congruence";
        "number_theory.modulo", 885, r"\\(?:bmod|mod)\b\s?", " modulo ", "modulo operator";
        "number_theory.divides", 880, r"\\mid\s?", " divides ", "divisibility";
        "number_theory.not_divides", 880, r"\\nmid\s?", " does not divide ", "non-divisibility";
        "number_theory.gcd", 870, r"\\gcd\s*\(\s*([^(),]*?)\s*,\s*([^()]*?)\s*\)",
        " the greatest common divisor of $1 and $2 ", "greatest common divisors";
        "number_theory.lcm", 870, r"\\lcm\s*\(\s*([^(),]*?)\s*,\s*([^()]*?)\s*\)",
        " the least common multiple of $1 and $2 ", "least common multiples";
        "number_theory.totient", 860, r"\\(?:var)?phi\s*\(\s*([^()]*?)\s*\)", " the totient of $1 ",
        "Euler's totient";
        "number_theory.residues", 850, r"\\mathbb\{Z\}\s*/\s*([a-z0-9]+)\s*\\mathbb\{Z\}",
        " the integers modulo $1 ", "residue rings";
        "number_theory.residues.subscript", 848, r"\\mathbb\{Z\}_\{([^{}]*)\}",
        " the integers modulo $1 ", "residue rings by subscript";
        "number_theory.legendre", 845, r"\(\s*\\frac\{([^{}]*)\}\{(p|q)\}\s*\)",
        " the Legendre symbol $1 over $2 ", "Legendre symbols";
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::NumberTheory, text)
    }

    #[test]
    fn congruences() {
        assert_eq!(say(r"a \equiv b \pmod{n}"), "a is congruent to b modulo n");
        assert_eq!(say(r"a \equiv 1 (\bmod 4)"), "a is congruent to 1 modulo 4");
    }

    #[test]
    fn divisibility() {
        assert_eq!(say(r"d \mid n"), "d divides n");
        assert_eq!(
            say(r"\gcd (a, b) = 1"),
            "the greatest common divisor of a and b equals 1"
        );
        assert_eq!(say(r"\phi (n)"), "the totient of n");
        assert_eq!(say(r"\mathbb{Z}/n\mathbb{Z}"), "the integers modulo n");
    }
}
