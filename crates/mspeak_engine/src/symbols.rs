//! What an expression tells the session: symbol definitions, references to
//! earlier symbols, and the document structure it opens or closes.
//!
//! Nothing here mutates memory. The result is a list of [`MemoryEffect`]s
//! that the pipeline commits once the whole call has succeeded.

use std::sync::LazyLock;

use mspeak_ast::{linearize, Diagnostic, DiagnosticKind, StructuralNode};
use mspeak_parser::is_text_command;
use mspeak_session::{ContextMemory, MemoryEffect, StructureKind};
use regex::Regex;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolAnalysis {
    pub effects: Vec<MemoryEffect>,
    /// Undefined-symbol notes, only filled when requested.
    pub diagnostics: Vec<Diagnostic>,
    /// Environments whose lone `\end{..}` closed a frame opened by an
    /// earlier expression. Their `StrayEnd` diagnostics no longer apply.
    pub resolved_ends: Vec<String>,
}

impl SymbolAnalysis {
    /// First structure this expression opens, if any.
    pub fn opened(&self) -> Option<StructureKind> {
        self.effects.iter().find_map(|e| match e {
            MemoryEffect::Open(kind) => Some(*kind),
            _ => None,
        })
    }
}

static RE_TEXT_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:text|textrm|textbf|textit|mathrm|mbox|emph)\{([^{}]*)\}")
        .expect("valid regex literal")
});

static RE_LET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:let|define|set|suppose|assume)\s+([A-Za-z](?:_\{[^{}]*\})?|\\[A-Za-z]+)\s*(?:=|:=|\\coloneqq|\\in|\bbe\b)\s*([^,;.]+)",
    )
    .expect("valid regex literal")
});

static RE_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s,(])([A-Za-z])\s*(?::=|\\coloneqq)\s*([^,;.]+)")
        .expect("valid regex literal")
});

static RE_SUCH_THAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z])\s+such\s+that\s+([^,;.]+)").expect("valid regex literal")
});

static RE_BINDERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\\(?:forall|exists)\s*!?\s*([A-Za-z])\b|(?:^|[^A-Za-z\\])d([A-Za-z])\b|\\\{\s*([A-Za-z])\b",
    )
    .expect("valid regex literal")
});

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(theorem|lemma|proposition|corollary|definition|example|remark|proof)\b",
    )
    .expect("valid regex literal")
});

static RE_QED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:qed|blacksquare|qedhere)\b|\bQ\.?E\.?D\.?").expect("valid regex literal"));

/// Big operators whose subscripts bind a variable.
const BINDING_COMMANDS: &[&str] = &[
    "sum", "prod", "lim", "int", "iint", "iiint", "oint", "bigcup", "bigcap", "max", "min",
    "sup", "inf", "limsup", "liminf",
];

fn is_opaque_command(name: &str) -> bool {
    is_text_command(name)
        || matches!(
            name,
            "mathrm" | "operatorname" | "mathbb" | "mathcal" | "mathfrak" | "mathscr" | "label"
                | "ref" | "eqref" | "cite" | "color"
        )
}

/// `parse_diagnostics` tells which environments were left open by this
/// expression, so a multi-line proof stays on the stack until its end.
pub fn analyze(
    tree: &StructuralNode,
    parse_diagnostics: &[Diagnostic],
    memory: &ContextMemory,
    report_undefined: bool,
) -> SymbolAnalysis {
    let text = plain_text(tree);
    let mut analysis = SymbolAnalysis::default();

    let definitions = definitions(&text);
    let defined_here: FxHashSet<&str> = definitions.iter().map(|(s, _)| s.as_str()).collect();
    let bound = bound_variables(tree, &text);

    let mut seen = FxHashSet::default();
    for symbol in referenced_letters(tree) {
        if defined_here.contains(symbol.as_str())
            || bound.contains(&symbol)
            || !seen.insert(symbol.clone())
        {
            continue;
        }
        if memory.is_defined(&symbol) {
            analysis.effects.push(MemoryEffect::Reference { symbol });
        } else if report_undefined {
            analysis.diagnostics.push(Diagnostic::undefined_symbol(symbol));
        }
    }

    analysis.effects.extend(
        definitions
            .into_iter()
            .map(|(symbol, meaning)| MemoryEffect::Define { symbol, meaning }),
    );
    let (structure, resolved_ends) = structure_effects(tree, &text, parse_diagnostics, memory);
    analysis.effects.extend(structure);
    analysis.resolved_ends = resolved_ends;

    if !analysis.effects.is_empty() {
        tracing::debug!(effects = analysis.effects.len(), "memory effects collected");
    }
    analysis
}

/// Linearized text with `\text{...}` style wrappers removed, so prose like
/// `\text{Let } x = 5` reads as `Let  x = 5`.
fn plain_text(tree: &StructuralNode) -> String {
    RE_TEXT_WRAPPER.replace_all(&linearize(tree), "$1").into_owned()
}

fn definitions(text: &str) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for re in [&*RE_LET, &*RE_ASSIGN, &*RE_SUCH_THAT] {
        for caps in re.captures_iter(text) {
            let symbol = caps[1].to_string();
            let meaning = caps[2].trim().to_string();
            if meaning.is_empty() || out.iter().any(|(s, _)| *s == symbol) {
                continue;
            }
            out.push((symbol, meaning));
        }
    }
    out
}

fn bound_variables(tree: &StructuralNode, text: &str) -> FxHashSet<String> {
    let mut bound: FxHashSet<String> = RE_BINDERS
        .captures_iter(text)
        .filter_map(|c| c.get(1).or(c.get(2)).or(c.get(3)))
        .map(|m| m.as_str().to_string())
        .collect();

    tree.walk(|node| {
        if let StructuralNode::Script {
            base,
            sub: Some(sub),
            ..
        } = node
        {
            if matches!(&**base, StructuralNode::Command { name, .. } if BINDING_COMMANDS.contains(&name.as_str()))
            {
                bound.extend(referenced_letters(sub));
            }
        }
        true
    });
    bound
}

/// Single Latin letters in literal text, in order of appearance. `e` and `i`
/// are constants, and a `d` directly before a letter is a differential.
fn referenced_letters(tree: &StructuralNode) -> Vec<String> {
    let mut out = Vec::new();
    tree.walk(|node| match node {
        StructuralNode::Command { name, .. } if is_opaque_command(name) => false,
        StructuralNode::Leaf(text) => {
            for word in text.split(|c: char| !c.is_ascii_alphabetic()) {
                let mut chars = word.chars();
                match (chars.next(), chars.next(), chars.next()) {
                    (Some(c), None, _) if c != 'e' && c != 'i' => out.push(c.to_string()),
                    _ => {}
                }
            }
            true
        }
        _ => true,
    });
    out
}

fn structure_effects(
    tree: &StructuralNode,
    text: &str,
    parse_diagnostics: &[Diagnostic],
    memory: &ContextMemory,
) -> (Vec<MemoryEffect>, Vec<String>) {
    let mut effects = Vec::new();
    let mut resolved_ends = Vec::new();
    let mut proof_closed = false;

    let unterminated = |env: &str| {
        parse_diagnostics.iter().any(|d| {
            matches!(&d.kind, DiagnosticKind::UnterminatedEnvironment(name) if name == env)
        })
    };
    let mut top = memory.structures().last().map(|f| f.kind);

    if let Some(kind) = RE_HEADING
        .captures(text)
        .and_then(|c| StructureKind::from_name(&c[1]))
    {
        effects.push(MemoryEffect::Open(kind));
        top = Some(kind);
    }

    tree.walk(|node| match node {
        StructuralNode::Environment { name, .. } => match StructureKind::from_name(name) {
            Some(kind) => {
                effects.push(MemoryEffect::Open(kind));
                top = Some(kind);
                if kind == StructureKind::Proof && !unterminated(name) {
                    effects.push(MemoryEffect::Close(kind));
                    proof_closed = true;
                }
                false
            }
            None => true,
        },
        // A lone `\end{proof}` finishes a proof begun in an earlier
        // expression. Statements stay open until the next statement or
        // proof, as they do when written on one line.
        StructuralNode::Command { name, args, .. } if name == "end" => {
            if let [StructuralNode::Leaf(env)] = args.as_slice() {
                if let Some(kind) = StructureKind::from_name(env) {
                    if !kind.is_statement() && top == Some(kind) {
                        effects.push(MemoryEffect::Close(kind));
                        resolved_ends.push(env.clone());
                        proof_closed = true;
                    }
                }
            }
            false
        }
        _ => true,
    });

    if !proof_closed && RE_QED.is_match(text) {
        effects.push(MemoryEffect::Close(StructureKind::Proof));
    }
    (effects, resolved_ends)
}
