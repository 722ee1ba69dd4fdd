//! General readings used by every domain: fractions, roots, scripts,
//! integrals, big operators, functions, delimiters, operators, Greek
//! letters and the final cleanup of anything still in LaTeX form.

use std::sync::LazyLock;

use mspeak_ast::DomainContext;
use mspeak_session::StructureKind;
use rustc_hash::FxHashMap;

use super::{is_simple_operand, spoken};
use crate::error::RuleError;
use crate::numbers;
use crate::pattern::{Captures, Pattern, Priority, Replacement};
use crate::regex_rules;
use crate::repository::RuleSetBuilder;

const MATRIX_ENVIRONMENTS: &[&str] = &[
    "matrix", "pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix", "smallmatrix", "array",
];

const ALIGNED_ENVIRONMENTS: &[&str] = &[
    "align", "align*", "aligned", "equation", "equation*", "gather", "gather*", "gathered",
    "multline", "multline*", "split", "eqnarray", "eqnarray*", "alignat", "flalign",
];

const STATEMENT_ENVIRONMENTS: &[&str] = &[
    "theorem", "theorem*", "lemma", "lemma*", "proposition", "proposition*", "corollary",
    "corollary*", "definition", "definition*", "example", "example*", "remark", "remark*",
    "proof", "proof*", "thm", "lem", "prop", "cor", "defn", "rem",
];

pub fn register(rules: &mut RuleSetBuilder) -> Result<(), RuleError> {
    let general = DomainContext::General;

    // Environments first: their bodies are split into rows before anything
    // else reads them.
    for (id, names, f, description) in [
        (
            "general.environment.matrix",
            MATRIX_ENVIRONMENTS,
            speak_matrix as fn(&Captures) -> String,
            "matrices read row by row",
        ),
        (
            "general.environment.cases",
            &["cases", "dcases"][..],
            speak_cases,
            "piecewise definitions",
        ),
        (
            "general.environment.aligned",
            ALIGNED_ENVIRONMENTS,
            speak_aligned,
            "multi-line displays read line by line",
        ),
        (
            "general.environment.statement",
            STATEMENT_ENVIRONMENTS,
            speak_statement,
            "theorem-like blocks announce themselves",
        ),
    ] {
        rules.add(Pattern::environment(
            id,
            general,
            Priority(650),
            names,
            Replacement::Function(f),
            description,
        ))?;
    }

    regex_rules!(rules, general;
        "general.one_sided.right", 600, r"\^\{\+\}", " from the right",
        "one-sided limit from above";
        "general.one_sided.left", 600, r"\^\{-\}", " from the left",
        "one-sided limit from below";
        "general.integral.definite", 590,
        r"\\int_\{([^{}]*)\}\^\{([^{}]*)\}\s*(.*?)\s*\bd\s?([a-zA-Z])\b",
        " the integral from $1 to $2 of $3, d $4 ",
        "definite integral with its differential";
        "general.integral.region", 585,
        r"\\int_\{([^{}]*)\}\s*(.*?)\s*\bd\s?([a-zA-Z])\b",
        " the integral over $1 of $2, d $3 ",
        "integral over a region with its differential";
        "general.integral.indefinite", 580,
        r"\\int\s+(.*?)\s*\bd\s?([a-zA-Z])\b", " the integral of $1, d $2 ",
        "indefinite integral with its differential";
        "general.integral.multiple", 578,
        r"\\(iint|iiint|oint)_\{([^{}]*)\}\s*(.*?)\s*\bd\s?([a-zA-Z])\b",
        Replacement::Function(speak_multiple_integral),
        "double, triple and contour integrals with a differential";
        "general.integral.multiple_over", 576, r"\\(iint|iiint|oint)_\{([^{}]*)\}",
        Replacement::Function(speak_multiple_integral),
        "double, triple and contour integrals over a region";
        "general.integral.bounds", 575, r"\\int_\{([^{}]*)\}\^\{([^{}]*)\}",
        " the integral from $1 to $2 of ",
        "definite integral without a differential";
        "general.integral.over", 570, r"\\int_\{([^{}]*)\}", " the integral over $1 of ",
        "integral over a region without a differential";
        "general.limit.approach", 560,
        r"\\lim_\{\s*([^{}]*?)\s*\\(?:to|rightarrow)\s*([^{}]*?)\s*\}",
        " the limit as $1 approaches $2 of ",
        "limit with an approach";
        "general.limit.over", 555, r"\\lim_\{([^{}]*)\}", " the limit over $1 of ",
        "limit with a subscript";
        "general.big_operator.bounds", 550,
        r"\\(sum|prod|coprod|bigcup|bigcap|bigoplus|bigotimes)_\{([^{}]*)\}\^\{([^{}]*)\}",
        Replacement::Function(speak_big_operator_bounds),
        "sums, products and unions with both bounds";
        "general.big_operator.over", 545,
        r"\\(sum|prod|coprod|bigcup|bigcap|bigoplus|bigotimes)_\{([^{}]*)\}",
        Replacement::Function(speak_big_operator_over),
        "sums, products and unions over an index set";
        "general.bounded", 540, r"\\(sup|inf|max|min)_\{([^{}]*)\}",
        Replacement::Function(speak_bounded),
        "suprema, infima, maxima and minima over a set";
    );

    for (id, name, arity, replacement, description) in [
        ("general.fraction", "frac", 2, Replacement::Function(speak_fraction), "fractions"),
        ("general.binomial", "binom", 2, " $1 choose $2 ".into(), "binomial coefficients"),
        ("general.root", "sqrt", 1, Replacement::Function(speak_root), "square and higher roots"),
        ("general.genfrac", "genfrac", 6, " $5 over $6 ".into(), "generalized fractions"),
    ] {
        rules.add(Pattern::command(
            id,
            general,
            Priority(620),
            name,
            arity,
            replacement,
            description,
        ))?;
    }

    for (id, name, template) in [
        ("general.font.blackboard", "mathbb", ""),
        ("general.font.script", "mathcal", " script $1 "),
        ("general.font.script_alt", "mathscr", " script $1 "),
        ("general.font.fraktur", "mathfrak", " fraktur $1 "),
        ("general.font.bold", "mathbf", " bold $1 "),
        ("general.font.bold_symbol", "boldsymbol", " bold $1 "),
        ("general.font.bm", "bm", " bold $1 "),
        ("general.font.roman", "mathrm", " $1 "),
        ("general.font.italic", "mathit", " $1 "),
        ("general.font.sans", "mathsf", " $1 "),
        ("general.font.mono", "mathtt", " $1 "),
        ("general.font.operator", "operatorname", " $1 "),
        ("general.accent.hat", "hat", " $1 hat "),
        ("general.accent.widehat", "widehat", " $1 hat "),
        ("general.accent.bar", "bar", " $1 bar "),
        ("general.accent.overline", "overline", " $1 bar "),
        ("general.accent.tilde", "tilde", " $1 tilde "),
        ("general.accent.widetilde", "widetilde", " $1 tilde "),
        ("general.accent.dot", "dot", " $1 dot "),
        ("general.accent.ddot", "ddot", " $1 double dot "),
        ("general.accent.vec", "vec", " vector $1 "),
        ("general.accent.arrow", "overrightarrow", " vector $1 "),
        ("general.accent.check", "check", " $1 check "),
        ("general.accent.underline", "underline", " $1 "),
        ("general.accent.cancel", "cancel", " $1 "),
        ("general.brace.over", "overbrace", " $1 "),
        ("general.brace.under", "underbrace", " $1 "),
        ("general.modulo", "pmod", " modulo $1 "),
        ("general.arrow.labelled", "xrightarrow", " maps by $1 to "),
    ] {
        let replacement = if name == "mathbb" {
            Replacement::Function(speak_blackboard)
        } else {
            template.into()
        };
        rules.add(Pattern::command(
            id,
            general,
            Priority(610),
            name,
            1,
            replacement,
            "fonts, accents and decorations",
        ))?;
    }
    for (id, name, template) in [
        ("general.stack.over", "overset", " $2 with $1 above "),
        ("general.stack.rel", "stackrel", " $2 with $1 above "),
        ("general.stack.under", "underset", " $2 with $1 below "),
    ] {
        rules.add(Pattern::command(
            id,
            general,
            Priority(605),
            name,
            2,
            template.into(),
            "annotated symbols",
        ))?;
    }

    regex_rules!(rules, general;
        "general.function", 460,
        r"(\\([A-Za-z]+)(?:_\{([^{}]*)\})?(?:\^\{([^{}]*)\})?\s*(?:\(([^()]*)\))?)",
        Replacement::Function(speak_function),
        "named functions with powers, bases and arguments";
        "general.script.squared", 450, r"\^\{2\}", " squared", "square";
        "general.script.cubed", 450, r"\^\{3\}", " cubed", "cube";
        "general.script.inverse", 450, r"\^\{-1\}", " inverse", "inverse";
        "general.script.transpose", 450, r"\^\{T\}", " transpose", "transpose";
        "general.script.prime", 450, r"\^\{\\prime\s*\}", " prime", "prime as a superscript";
        "general.script.ordinal", 440, r"\^\{(\d+|[a-zA-Z])\}",
        Replacement::Function(speak_ordinal_power), "ordinal powers";
        "general.script.power", 430, r"\^\{([^{}]*)\}", " to the power $1 ",
        "any other power";
        "general.script.sub", 420, r"_\{([^{}]*)\}", " sub $1 ", "subscripts";
        "general.application", 350,
        r"(^|[^A-Za-z\\])([fghFGHpqyuvwTLNRS])( prime| double prime)?\s*\(([^()]*)\)",
        "$1$2$3 of $4 ", "function application";
        "general.parens.atom", 340, r"\(\s*([A-Za-z0-9.]+)\s*\)", " $1 ",
        "parentheses around a single symbol are not read";
        "general.set.builder", 335,
        r"\\\{\s*([^{}|]*?)\s*(?:\\mid|\||:)\s*([^{}]*?)\s*\\\}",
        " the set of $1 such that $2 ", "set builder notation";
        "general.set.literal", 332, r"\\\{\s*([^{}]*?)\s*\\\}", " the set containing $1 ",
        "listed sets";
        "general.norm", 330, r"\\\|\s*([^|]*?)\s*\\\|", " the norm of $1 ", "norms";
        "general.absolute", 325, r"\|\s*([^|]+?)\s*\|", " the absolute value of $1 ",
        "absolute values";
        "general.floor", 320, r"\\lfloor\s*(.*?)\s*\\rfloor\s*", " the floor of $1 ", "floor";
        "general.ceiling", 320, r"\\lceil\s*(.*?)\s*\\rceil\s*", " the ceiling of $1 ",
        "ceiling";
        "general.angle_brackets", 320, r"\\langle\s*(.*?)\s*\\rangle\s*",
        " the inner product of $1 ", "angle brackets";
        "general.interval.closed", 310,
        r"\[\s*([^\[\],]+?)\s*,\s*([^\[\],]+?)\s*\]",
        " the closed interval from $1 to $2 ", "closed intervals";
        "general.parens.quantity", 300, r"\(([^()]*)\)", " the quantity $1 ",
        "parenthesized groups";
        "general.brackets.quantity", 295, r"\[([^\[\]]*)\]", " the quantity $1 ",
        "bracketed groups";
        "general.relations", 260, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_relation), "relations";
        "general.operators", 250, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_operator), "binary operators";
        "general.factorial", 245, r"([A-Za-z0-9)])\s*!", "$1 factorial ", "factorials";
        "general.arrows", 240, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_arrow), "arrows";
        "general.logic", 230, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_logic), "quantifiers and connectives";
        "general.ascii.plus", 220, r"\+", " plus ", "plus";
        "general.ascii.minus", 220, r"-", " minus ", "minus";
        "general.ascii.equals", 220, r"=", " equals ", "equals";
        "general.ascii.less", 220, r"<", " is less than ", "less than";
        "general.ascii.greater", 220, r">", " is greater than ", "greater than";
        "general.ascii.times", 220, r"\*", " times ", "star as multiplication";
        "general.ascii.slash", 220, r"/", " over ", "slash as division";
        "general.greek", 150, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_greek), "Greek letters";
        "general.symbols", 140, r"(\\([A-Za-z]+)\s?)",
        Replacement::Function(speak_symbol), "named symbols and operators";
        "general.cleanup.rows", 45, r"\\\\", ", ", "leftover row separators";
        "general.cleanup.escapes", 40, r"\\([{}%$&#_|])",
        Replacement::Function(speak_escape), "escaped characters";
        "general.cleanup.alignment", 35, r"&", " ", "leftover alignment marks";
        "general.cleanup.commands", 30, r"\\([A-Za-z]+)\s?", " $1 ",
        "unknown commands are read by name";
        "general.cleanup.braces", 20, r"[{}]", " ", "leftover braces";
        "general.cleanup.caret", 15, r"\^", " to the power ", "bare carets";
        "general.cleanup.underscore", 15, r"_", " sub ", "bare underscores";
        "general.cleanup.tilde", 15, r"~", " ", "ties";
        "general.cleanup.apostrophe", 12, r"'", " prime ", "stray prime marks";
        "general.cleanup.backslash", 10, r"\\", " ", "backslashes before anything else";
    );
    Ok(())
}

// =============================================================================
// Rewrite functions
// =============================================================================

fn speak_fraction(c: &Captures) -> String {
    let (num, den) = (c.get(1).trim(), c.get(2).trim());
    if let Some(words) = numbers::fraction_words(num, den) {
        return spoken(words);
    }
    if is_simple_operand(num) && is_simple_operand(den) {
        spoken(format!("{num} over {den}"))
    } else {
        spoken(format!("the fraction {num} over {den}"))
    }
}

fn speak_root(c: &Captures) -> String {
    let index = c.optional.as_deref().map(str::trim).unwrap_or("2");
    let root = match index {
        "" | "2" => "the square root of".to_string(),
        "3" => "the cube root of".to_string(),
        n => match numbers::ordinal_for(n) {
            Some(ordinal) => format!("the {ordinal} root of"),
            None => format!("the root of order {n} of"),
        },
    };
    let radicand = c.get(1).trim();
    if is_simple_operand(radicand) {
        spoken(format!("{root} {radicand}"))
    } else {
        spoken(format!("{root} the quantity {radicand}"))
    }
}

fn big_operator_name(command: &str) -> &'static str {
    match command {
        "sum" => "sum",
        "prod" => "product",
        "coprod" => "coproduct",
        "bigcup" => "union",
        "bigcap" => "intersection",
        "bigoplus" => "direct sum",
        "bigotimes" => "tensor product",
        _ => "operator",
    }
}

fn speak_big_operator_bounds(c: &Captures) -> String {
    spoken(format!(
        "the {} from {} to {} of",
        big_operator_name(c.get(1)),
        c.get(2),
        c.get(3)
    ))
}

fn speak_big_operator_over(c: &Captures) -> String {
    spoken(format!("the {} over {} of", big_operator_name(c.get(1)), c.get(2)))
}

fn speak_bounded(c: &Captures) -> String {
    let name = match c.get(1) {
        "sup" => "supremum",
        "inf" => "infimum",
        "max" => "maximum",
        _ => "minimum",
    };
    spoken(format!("the {name} over {} of", c.get(2)))
}

fn speak_multiple_integral(c: &Captures) -> String {
    let kind = match c.get(1) {
        "iint" => "double integral",
        "iiint" => "triple integral",
        _ => "contour integral",
    };
    let body = c.get(3).trim();
    let variable = c.get(4);
    if variable.is_empty() {
        spoken(format!("the {kind} over {} of", c.get(2)))
    } else {
        spoken(format!("the {kind} over {} of {body}, d {variable}", c.get(2)))
    }
}

fn speak_ordinal_power(c: &Captures) -> String {
    match numbers::ordinal_for(c.get(1)) {
        Some(ordinal) => format!(" to the {ordinal} power "),
        None => format!(" to the power {} ", c.get(1)),
    }
}

fn function_name(command: &str) -> Option<&'static str> {
    Some(match command {
        "sin" => "sine",
        "cos" => "cosine",
        "tan" => "tangent",
        "cot" => "cotangent",
        "sec" => "secant",
        "csc" => "cosecant",
        "arcsin" => "arc sine",
        "arccos" => "arc cosine",
        "arctan" => "arc tangent",
        "sinh" => "hyperbolic sine",
        "cosh" => "hyperbolic cosine",
        "tanh" => "hyperbolic tangent",
        "coth" => "hyperbolic cotangent",
        "log" | "lg" => "log",
        "ln" => "natural log",
        "exp" => "exponential",
        _ => return None,
    })
}

/// `\sin^{2}(x)` is "sine squared of x", `\log_{2} n` is "log base 2 of n".
fn speak_function(c: &Captures) -> String {
    let Some(name) = function_name(c.get(2)) else {
        return c.get(1).to_string();
    };
    let mut phrase = name.to_string();
    match c.get(4).trim() {
        "" => {}
        "2" => phrase.push_str(" squared"),
        "3" => phrase.push_str(" cubed"),
        "-1" => phrase.push_str(" inverse"),
        power => {
            phrase.push_str(" to the power ");
            phrase.push_str(power);
        }
    }
    let base = c.get(3).trim();
    if !base.is_empty() {
        phrase.push_str(" base ");
        phrase.push_str(base);
    }
    phrase.push_str(" of ");
    phrase.push_str(c.get(5).trim());
    spoken(phrase)
}

fn speak_blackboard(c: &Captures) -> String {
    let letter = c.get(1).trim();
    spoken(match letter {
        "R" => "the real numbers".to_string(),
        "N" => "the natural numbers".to_string(),
        "Z" => "the integers".to_string(),
        "Q" => "the rational numbers".to_string(),
        "C" => "the complex numbers".to_string(),
        other => format!("blackboard bold {other}"),
    })
}

fn speak_escape(c: &Captures) -> String {
    match c.get(1) {
        "%" => " percent ",
        "$" => " dollars ",
        "&" => " and ",
        "#" => " number ",
        "_" => " underscore ",
        _ => " ",
    }
    .to_string()
}

/// A leading minus in a cell is a sign.
fn cell_text(cell: &str) -> String {
    let cell = cell.trim();
    match cell.strip_prefix('-') {
        Some(rest) => format!("negative {}", rest.trim_start()),
        None => cell.to_string(),
    }
}

fn split_rows(body: &str) -> Vec<Vec<String>> {
    body.split(r"\\")
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| row.split('&').map(cell_text).collect())
        .collect()
}

fn join_with_and(items: &[String], separator: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}{separator} and {last}", init.join(separator)),
    }
}

fn speak_matrix(c: &Captures) -> String {
    let rows = split_rows(c.get(1));
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let reading = if rows.len() > 1 && cols == 1 {
        let entries: Vec<String> = rows.iter().map(|r| r.join(" ")).collect();
        format!("the column vector {}", entries.join(", "))
    } else if rows.len() == 1 {
        format!("the row vector {}", rows[0].join(", "))
    } else {
        let lines: Vec<String> = rows.iter().map(|r| r.join(", ")).collect();
        format!(
            "the {} by {} matrix with rows {}",
            numbers::cardinal(rows.len() as u32),
            numbers::cardinal(cols as u32),
            join_with_and(&lines, ";")
        )
    };
    match c.name.as_deref() {
        Some("vmatrix") => spoken(format!("the determinant of {reading}")),
        Some("Vmatrix") => spoken(format!("the norm of {reading}")),
        _ => spoken(reading),
    }
}

fn speak_cases(c: &Captures) -> String {
    let branches: Vec<String> = split_rows(c.get(1))
        .into_iter()
        .map(|row| {
            let value = row.first().cloned().unwrap_or_default();
            let condition = row.get(1).map(|s| s.trim()).unwrap_or("");
            if condition.is_empty() {
                value
            } else if condition.starts_with("if ")
                || condition.starts_with("when ")
                || condition.starts_with("otherwise")
            {
                format!("{value} {condition}")
            } else {
                format!("{value} if {condition}")
            }
        })
        .collect();
    spoken(format!("piecewise, {}", branches.join("; ")))
}

fn speak_aligned(c: &Captures) -> String {
    let lines: Vec<String> = split_rows(c.get(1))
        .into_iter()
        .map(|row| row.join(" "))
        .collect();
    spoken(lines.join(", "))
}

fn speak_statement(c: &Captures) -> String {
    let kind = c
        .name
        .as_deref()
        .and_then(StructureKind::from_name)
        .unwrap_or(StructureKind::Remark);
    let mut heading = kind.as_str().to_string();
    if let Some(first) = heading.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    let mut body = c.get(1).trim().to_string();
    if !body.is_empty() && !body.ends_with(['.', '!', '?', ',', ';', ':']) {
        body.push('.');
    }
    let opening = if body.is_empty() {
        format!("{heading}.")
    } else {
        format!("{heading}. {body}")
    };
    if kind == StructureKind::Proof {
        spoken(format!("{opening} End of proof."))
    } else {
        spoken(opening)
    }
}

// =============================================================================
// Symbol tables
// =============================================================================

type SymbolTable = LazyLock<FxHashMap<&'static str, &'static str>>;

fn table(entries: &[(&'static str, &'static str)]) -> FxHashMap<&'static str, &'static str> {
    entries.iter().copied().collect()
}

fn lookup(table: &SymbolTable, c: &Captures) -> String {
    match table.get(c.get(2)) {
        Some(phrase) => spoken(phrase),
        None => c.get(1).to_string(),
    }
}

static RELATIONS: SymbolTable = LazyLock::new(|| {
    table(&[
        ("leq", "is less than or equal to"),
        ("geq", "is greater than or equal to"),
        ("neq", "is not equal to"),
        ("approx", "is approximately equal to"),
        ("equiv", "is equivalent to"),
        ("sim", "is similar to"),
        ("simeq", "is similar or equal to"),
        ("cong", "is congruent to"),
        ("propto", "is proportional to"),
        ("ll", "is much less than"),
        ("gg", "is much greater than"),
        ("prec", "precedes"),
        ("succ", "succeeds"),
        ("preceq", "precedes or equals"),
        ("succeq", "succeeds or equals"),
        ("subset", "is a subset of"),
        ("subseteq", "is a subset of or equal to"),
        ("subsetneq", "is a proper subset of"),
        ("nsubseteq", "is not a subset of"),
        ("supset", "is a superset of"),
        ("supseteq", "is a superset of or equal to"),
        ("in", "is in"),
        ("notin", "is not in"),
        ("ni", "contains"),
        ("mid", "divides"),
        ("nmid", "does not divide"),
        ("parallel", "is parallel to"),
        ("perp", "is perpendicular to"),
        ("models", "models"),
        ("vdash", "proves"),
        ("dashv", "is proved by"),
    ])
});

static OPERATORS: SymbolTable = LazyLock::new(|| {
    table(&[
        ("times", "times"),
        ("cdot", "times"),
        ("div", "divided by"),
        ("pm", "plus or minus"),
        ("mp", "minus or plus"),
        ("ast", "star"),
        ("star", "star"),
        ("circ", "composed with"),
        ("bullet", "dot"),
        ("oplus", "direct sum"),
        ("otimes", "tensor"),
        ("wedge", "wedge"),
        ("vee", "vee"),
        ("cap", "intersect"),
        ("cup", "union"),
        ("setminus", "minus"),
        ("sqcup", "disjoint union"),
        ("mod", "mod"),
        ("bmod", "mod"),
    ])
});

static ARROWS: SymbolTable = LazyLock::new(|| {
    table(&[
        ("to", "to"),
        ("rightarrow", "goes to"),
        ("longrightarrow", "goes to"),
        ("leftarrow", "gets"),
        ("Rightarrow", "implies"),
        ("Leftarrow", "is implied by"),
        ("impliedby", "is implied by"),
        ("leftrightarrow", "corresponds to"),
        ("Leftrightarrow", "if and only if"),
        ("mapsto", "maps to"),
        ("longmapsto", "maps to"),
        ("hookrightarrow", "embeds into"),
        ("uparrow", "increases to"),
        ("downarrow", "decreases to"),
        ("rightharpoonup", "converges weakly to"),
    ])
});

static LOGIC: SymbolTable = LazyLock::new(|| {
    table(&[
        ("forall", "for all"),
        ("exists", "there exists"),
        ("nexists", "there does not exist"),
        ("neg", "not"),
        ("land", "and"),
        ("lor", "or"),
        ("top", "top"),
        ("bot", "bottom"),
        ("therefore", "therefore"),
        ("because", "because"),
        ("colon", "maps"),
    ])
});

static GREEK: SymbolTable = LazyLock::new(|| {
    table(&[
        ("alpha", "alpha"),
        ("beta", "beta"),
        ("gamma", "gamma"),
        ("delta", "delta"),
        ("epsilon", "epsilon"),
        ("varepsilon", "epsilon"),
        ("zeta", "zeta"),
        ("eta", "eta"),
        ("theta", "theta"),
        ("vartheta", "theta"),
        ("iota", "iota"),
        ("kappa", "kappa"),
        ("lambda", "lambda"),
        ("mu", "mu"),
        ("nu", "nu"),
        ("xi", "xi"),
        ("omicron", "omicron"),
        ("pi", "pi"),
        ("varpi", "pi"),
        ("rho", "rho"),
        ("varrho", "rho"),
        ("sigma", "sigma"),
        ("varsigma", "sigma"),
        ("tau", "tau"),
        ("upsilon", "upsilon"),
        ("phi", "phi"),
        ("varphi", "phi"),
        ("chi", "chi"),
        ("psi", "psi"),
        ("omega", "omega"),
        ("Gamma", "capital gamma"),
        ("Delta", "capital delta"),
        ("Theta", "capital theta"),
        ("Lambda", "capital lambda"),
        ("Xi", "capital xi"),
        ("Pi", "capital pi"),
        ("Sigma", "capital sigma"),
        ("Upsilon", "capital upsilon"),
        ("Phi", "capital phi"),
        ("Psi", "capital psi"),
        ("Omega", "capital omega"),
    ])
});

static SYMBOLS: SymbolTable = LazyLock::new(|| {
    table(&[
        ("infty", "infinity"),
        ("partial", "partial"),
        ("nabla", "nabla"),
        ("hbar", "h bar"),
        ("ell", "ell"),
        ("aleph", "aleph"),
        ("prime", "prime"),
        ("angle", "angle"),
        ("triangle", "triangle"),
        ("emptyset", "the empty set"),
        ("varnothing", "the empty set"),
        ("ldots", "dot dot dot"),
        ("vdots", "dot dot dot"),
        ("ddots", "dot dot dot"),
        ("qed", "end of proof"),
        ("blacksquare", "end of proof"),
        ("square", "square"),
        ("checkmark", "check"),
        ("dagger", "dagger"),
        ("ddagger", "double dagger"),
        ("complement", "complement"),
        ("int", "the integral of"),
        ("iint", "the double integral of"),
        ("iiint", "the triple integral of"),
        ("oint", "the contour integral of"),
        ("sum", "the sum of"),
        ("prod", "the product of"),
        ("coprod", "the coproduct of"),
        ("bigcup", "the union of"),
        ("bigcap", "the intersection of"),
        ("bigoplus", "the direct sum of"),
        ("bigotimes", "the tensor product of"),
        ("lim", "the limit of"),
        ("limsup", "the limit superior of"),
        ("liminf", "the limit inferior of"),
        ("sup", "the supremum of"),
        ("inf", "the infimum of"),
        ("max", "the maximum of"),
        ("min", "the minimum of"),
        ("arg", "the argument of"),
        ("det", "the determinant of"),
        ("dim", "the dimension of"),
        ("ker", "the kernel of"),
        ("deg", "the degree of"),
        ("gcd", "the greatest common divisor of"),
        ("lcm", "the least common multiple of"),
        ("Pr", "the probability of"),
        ("Re", "the real part of"),
        ("Im", "the imaginary part of"),
        ("hom", "hom"),
        ("langle", "left angle bracket"),
        ("rangle", "right angle bracket"),
        ("lfloor", "floor"),
        ("rfloor", ""),
        ("lceil", "ceiling"),
        ("rceil", ""),
        ("item", ","),
        ("newline", ","),
        ("cr", ","),
    ])
});

fn speak_relation(c: &Captures) -> String {
    lookup(&RELATIONS, c)
}

fn speak_operator(c: &Captures) -> String {
    lookup(&OPERATORS, c)
}

fn speak_arrow(c: &Captures) -> String {
    lookup(&ARROWS, c)
}

fn speak_logic(c: &Captures) -> String {
    lookup(&LOGIC, c)
}

fn speak_greek(c: &Captures) -> String {
    lookup(&GREEK, c)
}

fn speak_symbol(c: &Captures) -> String {
    lookup(&SYMBOLS, c)
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::rewrite;
    use mspeak_ast::DomainContext;

    fn say(text: &str) -> String {
        rewrite(DomainContext::General, text)
    }

    #[test]
    fn fractions() {
        assert_eq!(say(r"\frac{1}{2}"), "one half");
        assert_eq!(say(r"\frac{3}{4}"), "three quarters");
        assert_eq!(say(r"\frac{a}{b}"), "a over b");
        assert_eq!(say(r"\frac{x+1}{2}"), "the fraction x plus 1 over 2");
        assert_eq!(say(r"\frac{\frac{1}{2}}{3}"), "the fraction one half over 3");
    }

    #[test]
    fn definite_integral() {
        assert_eq!(
            say(r"\int_{0}^{1} x^{2} dx"),
            "the integral from 0 to 1 of x squared, d x"
        );
    }

    #[test]
    fn roots_and_powers() {
        assert_eq!(say(r"\sqrt{x}"), "the square root of x");
        assert_eq!(say(r"\sqrt[3]{8}"), "the cube root of 8");
        assert_eq!(say(r"x^{5}"), "x to the fifth power");
        assert_eq!(say(r"x^{n}"), "x to the nth power");
        assert_eq!(say(r"a_{n+1}"), "a sub n plus 1");
    }

    #[test]
    fn sums_and_limits() {
        assert_eq!(say(r"\sum_{i=1}^{n} i"), "the sum from i equals 1 to n of i");
        assert_eq!(
            say(r"\lim_{x \to 0} \frac{\sin x}{x}"),
            "the limit as x approaches 0 of the fraction sine of x over x"
        );
    }

    #[test]
    fn functions_and_grouping() {
        assert_eq!(say(r"\sin^{2} x"), "sine squared of x");
        assert_eq!(say(r"\log_{2} n"), "log base 2 of n");
        assert_eq!(say("f(x)"), "f of x");
        assert_eq!(say("(x+1)^{2}"), "the quantity x plus 1 squared");
        assert_eq!(say("|x|"), "the absolute value of x");
    }

    #[test]
    fn symbols_and_cleanup() {
        assert_eq!(say(r"\alpha \leq \beta"), "alpha is less than or equal to beta");
        assert_eq!(say(r"\Gamma"), "capital gamma");
        assert_eq!(say(r"x \in \mathbb{R}"), "x is in the real numbers");
        assert_eq!(say(r"\foo{x}"), "foo x");
        assert_eq!(say(r"n!"), "n factorial");
        assert_eq!(say(r"caf \é"), "caf é");
    }

    #[test]
    fn matrices_and_cases() {
        assert_eq!(
            say(r"\begin{pmatrix}1 & 2 \\ 3 & 4\end{pmatrix}"),
            "the two by two matrix with rows 1, 2; and 3, 4"
        );
        assert_eq!(
            say(r"\begin{cases}x & x \geq 0 \\ -x & \text{otherwise}\end{cases}"),
            "piecewise, x if x is greater than or equal to 0; negative x otherwise"
        );
    }

    #[test]
    fn statements_announce_themselves() {
        assert_eq!(
            say(r"\begin{proof}trivial\end{proof}"),
            "Proof. trivial. End of proof."
        );
        assert_eq!(say(r"\begin{theorem}\end{theorem}"), "Theorem.");
        assert_eq!(say(r"\begin{proof}\end{proof}"), "Proof. End of proof.");
    }

    #[test]
    fn outputs_have_no_hyphens_or_latex() {
        for input in [
            r"\frac{21}{22} + \binom{n}{k}",
            r"\oint_{C} f(z) dz",
            r"\nabla \cdot F",
            r"\{x \mid x > 0\}",
            r"x + \é",
        ] {
            let out = say(input);
            assert!(!out.contains('-'), "{input} -> {out}");
            assert!(!out.contains('\\'), "{input} -> {out}");
            assert!(!out.contains('{'), "{input} -> {out}");
        }
    }
}
