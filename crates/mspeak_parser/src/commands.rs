//! Known-command arity table.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandShape {
    /// Mandatory arguments.
    pub args: usize,
    /// Accepts one `[...]` argument before the mandatory ones.
    pub optional: bool,
}

impl CommandShape {
    const fn new(args: usize, optional: bool) -> Self {
        Self { args, optional }
    }
}

const TWO_ARGS: &[&str] = &[
    "frac", "dfrac", "tfrac", "cfrac", "binom", "dbinom", "tbinom", "overset", "underset",
    "stackrel",
];

const ONE_ARG: &[&str] = &[
    "text", "textbf", "textit", "textrm", "textsf", "texttt", "emph", "mbox", "mathrm",
    "mathbf", "mathit", "mathsf", "mathtt", "mathcal", "mathbb", "mathfrak", "mathscr",
    "operatorname", "boldsymbol", "bm", "vec", "hat", "widehat", "bar", "overline",
    "underline", "tilde", "widetilde", "dot", "ddot", "check", "breve", "acute", "grave",
    "overrightarrow", "overleftarrow", "overbrace", "underbrace", "cancel", "boxed", "pmod",
    "pod", "color", "abs", "norm", "lvert", "phantom",
];

const ONE_ARG_WITH_OPTION: &[&str] = &["sqrt", "xrightarrow", "xleftarrow"];

/// Commands that take no argument and are read by the rule tables.
const NO_ARGS: &[&str] = &[
    // greek
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "omicron", "pi", "varpi", "rho",
    "varrho", "sigma", "varsigma", "tau", "upsilon", "phi", "varphi", "chi", "psi", "omega",
    "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega",
    // big operators
    "int", "iint", "iiint", "oint", "sum", "prod", "coprod", "bigcup", "bigcap", "bigoplus",
    "bigotimes", "lim", "limsup", "liminf", "sup", "inf", "max", "min", "arg", "det", "dim",
    "ker", "deg", "gcd", "Pr", "hom",
    // functions
    "sin", "cos", "tan", "cot", "sec", "csc", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "coth", "log", "ln", "lg", "exp", "Re", "Im", "mod", "bmod",
    // binary operators and relations
    "cdot", "times", "div", "pm", "mp", "ast", "star", "circ", "bullet", "oplus", "otimes",
    "wedge", "vee", "cap", "cup", "setminus", "leq", "le", "geq", "ge", "neq", "ne", "approx",
    "equiv", "sim", "simeq", "cong", "propto", "ll", "gg", "prec", "succ", "preceq", "succeq",
    "subset", "subseteq", "subsetneq", "supset", "supseteq", "in", "notin", "ni", "mid",
    "nmid", "parallel", "perp", "models", "vdash", "dashv", "leqslant", "geqslant", "coloneqq",
    // arrows
    "to", "rightarrow", "leftarrow", "Rightarrow", "Leftarrow", "leftrightarrow",
    "Leftrightarrow", "iff", "implies", "impliedby", "mapsto", "longrightarrow",
    "longmapsto", "hookrightarrow", "uparrow", "downarrow", "rightharpoonup",
    // logic and sets
    "forall", "exists", "nexists", "neg", "lnot", "land", "lor", "emptyset", "varnothing",
    "top", "bot", "therefore", "because", "complement", "sqcup", "colon", "Longrightarrow",
    "Longleftrightarrow", "nsubseteq",
    // symbols
    "infty", "partial", "nabla", "hbar", "ell", "Re", "aleph", "prime", "angle", "triangle",
    "square", "blacksquare", "qed", "checkmark", "dagger", "ddagger",
    // dots
    "ldots", "cdots", "vdots", "ddots", "dots", "dotsc", "dotsb",
    // delimiters
    "langle", "rangle", "lceil", "rceil", "lfloor", "rfloor", "vert", "Vert", "rvert",
    "lVert", "rVert", "left", "right", "middle",
    // environments and layout
    "begin", "end", "item", "newline", "quad", "qquad", "cr",
];

static KNOWN: LazyLock<FxHashMap<&'static str, CommandShape>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    for name in NO_ARGS {
        table.insert(*name, CommandShape::new(0, false));
    }
    for name in ONE_ARG {
        table.insert(*name, CommandShape::new(1, false));
    }
    for name in ONE_ARG_WITH_OPTION {
        table.insert(*name, CommandShape::new(1, true));
    }
    for name in TWO_ARGS {
        table.insert(*name, CommandShape::new(2, false));
    }
    table.insert("genfrac", CommandShape::new(6, false));
    table
});

pub fn shape(name: &str) -> Option<CommandShape> {
    KNOWN.get(name).copied()
}

/// Commands whose arguments hold prose rather than math.
pub fn is_text_command(name: &str) -> bool {
    matches!(
        name,
        "text" | "textbf" | "textit" | "textrm" | "textsf" | "texttt" | "emph" | "mbox"
    )
}

/// Environments that take one mandatory argument after `\begin{name}`.
pub fn environment_args(name: &str) -> usize {
    match name {
        "array" | "tabular" | "subarray" => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_arities() {
        assert_eq!(shape("frac"), Some(CommandShape::new(2, false)));
        assert_eq!(shape("sqrt"), Some(CommandShape::new(1, true)));
        assert_eq!(shape("alpha"), Some(CommandShape::new(0, false)));
        assert_eq!(shape("genfrac").map(|s| s.args), Some(6));
        assert_eq!(shape("frobnicate"), None);
    }
}
