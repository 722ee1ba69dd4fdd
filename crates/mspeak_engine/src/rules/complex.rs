//! Complex analysis: contour integrals, residues, conjugates and moduli.

use mspeak_ast::DomainContext;

use crate::error::RuleError;
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    regex_rules!(rules, DomainContext::ComplexAnalysis;
        "complex.contour.closed", 900,
        r"\\oint_\{([^{}]*)\}\s*(.*?)\s*\bd\s?([a-zA-Z])\b",
        " the contour integral around $1 of $2, d $3 ", "contour integral with its differential";
        "complex.contour.over", 895, r"\\oint_\{([^{}]*)\}", " the contour integral around $1 of ",
        "contour integral around a curve";
        "complex.contour.bare", 890, r"\\oint\s?", " the contour integral of ",
        "contour integral without a curve";
        "complex.residue.at", 880, r"\\Res_\{\s*[a-zA-Z]\s*=\s*([^{}]*?)\s*\}\s*",
        " the residue at $1 of ", "residue at a point";
        "complex.residue.over", 878, r"\\Res_\{([^{}]*)\}\s*", " the residue at $1 of ",
        "residue with a subscript";
        "complex.residue.bare", 876, r"\\Res\b\s?", " the residue of ", "residue";
        "complex.conjugate", 870, r"\\(?:overline|bar)\{\s*([zw])\s*\}", " the conjugate of $1 ",
        "complex conjugates";
        "complex.real_part", 860, r"\\Re\b\s?", " the real part of ", "real part";
        "complex.imaginary_part", 860, r"\\Im\b\s?", " the imaginary part of ", "imaginary part";
        "complex.modulus", 850, r"\|\s*([zw])\s*\|", " the modulus of $1 ", "modulus";
        "complex.argument", 845, r"\\arg\s*\(?\s*([zw])\s*\)?", " the argument of $1 ",
        "argument";
        "complex.plane", 840, r"\\mathbb\{C\}", " the complex plane ", "the complex plane";
        "complex.exponential", 820, r"\be\^\{i\s*([^{}]*)\}", " e to the i $1 ",
        "complex exponentials";
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::ComplexAnalysis, text)
    }

    #[test]
    fn contour_integrals() {
        assert_eq!(
            say(r"\oint_{C} f(z) dz"),
            "the contour integral around C of f of z, d z"
        );
    }

    #[test]
    fn residues() {
        assert_eq!(say(r"\operatorname{Res}_{z=0} f"), "the residue at 0 of f");
    }

    #[test]
    fn parts_and_moduli() {
        assert_eq!(say("|z|"), "the modulus of z");
        assert_eq!(say(r"\bar{z}"), "the conjugate of z");
        assert_eq!(say(r"\Re z"), "the real part of z");
        assert_eq!(say(r"e^{i\theta }"), "e to the i theta");
    }
}
